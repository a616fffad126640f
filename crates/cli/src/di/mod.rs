use holeflux_application::use_cases::{CollectMetricsUseCase, PublishMetricsUseCase};
use holeflux_domain::{Config, DomainError};
use holeflux_infrastructure::appliance::PiholeApiClient;
use holeflux_infrastructure::sink::InfluxSink;
use std::sync::Arc;

pub struct UseCases {
    pub collect: Arc<CollectMetricsUseCase>,
    pub publish: Arc<PublishMetricsUseCase>,
}

impl UseCases {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        let table = Arc::new(config.taxonomy.build_table());
        let appliance = Arc::new(PiholeApiClient::from_config(
            &config.appliance,
            table.clone(),
        )?);
        let sink = Arc::new(InfluxSink::from_config(&config.sink)?);

        Ok(Self {
            collect: Arc::new(CollectMetricsUseCase::new(appliance, table, config.mode())),
            publish: Arc::new(PublishMetricsUseCase::new(sink)),
        })
    }
}
