//! Print the environment variables a service binds its options to.

use anyhow::Result;
use sealed_config::{ConfigError, OptionDescriptor, OptionRegistry, bind_all};

pub fn run(service: &str, options: &[String]) -> Result<()> {
    for line in env_names(service, options)? {
        println!("{line}");
    }
    Ok(())
}

/// One `option=VARIABLE` line per option, in the order given.
///
/// Options go through the same registry a service uses, so names a service
/// could not declare are rejected here too.
fn env_names(service: &str, options: &[String]) -> Result<Vec<String>, ConfigError> {
    if service.trim().is_empty() {
        return Err(ConfigError::Input("service name is required".to_string()));
    }

    let mut registry = OptionRegistry::new();
    for option in options {
        registry.register(OptionDescriptor::string(option.as_str(), "", ""))?;
    }
    let bindings = bind_all(&registry, service);

    Ok(options
        .iter()
        .filter_map(|option| {
            bindings
                .var_name(option)
                .map(|var| format!("{option}={var}"))
        })
        .collect())
}
