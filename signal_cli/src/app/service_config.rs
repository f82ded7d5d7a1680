use std::io::Write;

use serde::Serialize;
use signal_service::{Capabilities, CdnUrls, EndpointUrl, Limits, ServiceConfig};

use super::CommandError;
use crate::args::OutputType;

pub struct ShowServiceConfig<'a> {
    config: &'a ServiceConfig,
    output: OutputType,
}

impl<'a> ShowServiceConfig<'a> {
    pub fn new(config: &'a ServiceConfig, output: OutputType) -> Self {
        Self { config, output }
    }

    pub fn run(self, writer: &mut impl Write) -> Result<(), CommandError> {
        let ShowServiceConfig { config, output } = self;
        match output {
            OutputType::Json => {
                let json = serde_json::to_string(&ServiceConfigExport::from(config))?;
                writeln!(writer, "{json}")?;
            }
            OutputType::PlainText => {
                for line in plain_text(config) {
                    writeln!(writer, "{line}")?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }
}

fn plain_text(config: &ServiceConfig) -> Vec<String> {
    let mut lines = Vec::new();
    let mut push = |label: String, urls: &[EndpointUrl]| {
        for url in urls {
            let trust = url
                .trust_store()
                .map_or_else(|| "-".to_string(), ToString::to_string);
            lines.push(format!("{label}: {} Trust store: {trust}", url.url()));
        }
    };
    push("Service".into(), config.service_urls());
    for (number, urls) in config.cdn_urls().iter() {
        push(format!("CDN {number}"), urls);
    }
    push("Contact discovery".into(), config.contact_discovery_urls());
    push("Key backup".into(), config.key_backup_urls());
    push("Storage".into(), config.storage_urls());

    let Capabilities {
        uuid,
        gv2,
        storage,
        gv1_migration,
    } = config.capabilities();
    lines.push(format!(
        "Capabilities: uuid={uuid} gv2={gv2} storage={storage} gv1-migration={gv1_migration}"
    ));

    let limits = config.limits();
    lines.push(format!(
        "Limits: prekey-minimum={} prekey-batch={} attachment={} envelope={} avatar={}",
        limits.prekey_minimum_count,
        limits.prekey_batch_size,
        limits.max_attachment_size,
        limits
            .envelope_limit()
            .map_or_else(|| "unlimited".to_string(), |size| size.to_string()),
        limits.avatar_download_failsafe_max_size,
    ));
    lines
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceConfigExport<'a> {
    service_urls: &'a [EndpointUrl],
    cdn_urls: &'a CdnUrls,
    contact_discovery_urls: &'a [EndpointUrl],
    key_backup_urls: &'a [EndpointUrl],
    storage_urls: &'a [EndpointUrl],
    capabilities: Capabilities,
    limits: Limits,
    unidentified_sender_trust_root: &'a str,
    cds_mrenclave: &'a str,
}

impl<'a> From<&'a ServiceConfig> for ServiceConfigExport<'a> {
    fn from(config: &'a ServiceConfig) -> Self {
        Self {
            service_urls: config.service_urls(),
            cdn_urls: config.cdn_urls(),
            contact_discovery_urls: config.contact_discovery_urls(),
            key_backup_urls: config.key_backup_urls(),
            storage_urls: config.storage_urls(),
            capabilities: config.capabilities(),
            limits: config.limits(),
            unidentified_sender_trust_root: config.unidentified_sender_trust_root(),
            cds_mrenclave: config.cds_mrenclave(),
        }
    }
}
