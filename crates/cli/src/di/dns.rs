use rootwalk_application::use_cases::{HandleDnsQueryUseCase, LookupUseCase};
use rootwalk_domain::Config;
use rootwalk_infrastructure::dns::{DnsServerHandler, IterativeResolver, UdpTransport};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub handler_use_case: Arc<HandleDnsQueryUseCase>,
    pub lookup: LookupUseCase,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing DNS services");

        let transport = Arc::new(UdpTransport::new());
        let resolver = Arc::new(IterativeResolver::from_config(transport, &config.resolver)?);

        let handler_use_case = Arc::new(HandleDnsQueryUseCase::new(resolver.clone()));
        let lookup = LookupUseCase::new(resolver);

        Ok(Self {
            handler_use_case,
            lookup,
        })
    }

    pub fn server_handler(&self) -> DnsServerHandler {
        DnsServerHandler::new(self.handler_use_case.clone())
    }
}
