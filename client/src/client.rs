use anyhow::Result;
use commons::domain::{Namespace, PluginType};
use controlproxy::{CallContext, ControlProxy, GrpcClientConfig, ManagesMetrics};
use log::{error, info};
use std::env;
use std::time::Duration;

const ENDPOINT_VAR: &str = "CONTROLPROXY_ENDPOINT";

/// Probes a metric manager: expands the namespace given on the command line
/// and, with `--plugin name:type:version`, asks for that plugin's content types.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut config = match env::var(ENDPOINT_VAR) {
        Ok(endpoint) => GrpcClientConfig::new(endpoint),
        Err(_) => GrpcClientConfig::default(),
    };
    config.call_timeout = Some(Duration::from_secs(5));

    let mut args = env::args().skip(1);
    let mut namespace = Vec::new();
    let mut plugin = None;
    while let Some(arg) = args.next() {
        if arg == "--plugin" {
            plugin = args.next();
        } else {
            namespace.extend(arg.split('/').filter(|s| !s.is_empty()).map(String::from));
        }
    }
    if namespace.is_empty() {
        namespace = vec!["*".to_string()];
    }
    let namespace = Namespace::from(namespace);

    let proxy = ControlProxy::connect(&config).await?;
    let ctx = CallContext::background();

    match proxy.expand_wildcards(&ctx, &namespace).await {
        Ok(nss) => {
            info!("{} expanded to {} namespace(s)", namespace, nss.len());
            for ns in nss {
                println!("{}", ns);
            }
        }
        Err(e) => error!("Expanding {} failed: {}", namespace, e),
    }

    if let Some(plugin) = plugin {
        let parts: Vec<&str> = plugin.split(':').collect();
        let [name, type_name, version] = parts.as_slice() else {
            anyhow::bail!("Expected --plugin name:type:version, got {}", plugin);
        };
        let plugin_type: PluginType = type_name.parse().map_err(anyhow::Error::msg)?;
        let version: i32 = version.parse()?;
        match proxy
            .get_plugin_content_types(&ctx, name, plugin_type, version)
            .await
        {
            Ok(types) => {
                println!("accepts: {}", types.accepted.join(", "));
                println!("returns: {}", types.returned.join(", "));
            }
            Err(e) => error!("Content types of {} failed: {}", name, e),
        }
    }

    Ok(())
}
