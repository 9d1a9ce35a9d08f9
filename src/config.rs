use anyhow::Context;
use std::env;
use std::path::PathBuf;
use strum_macros::{Display, EnumString};
use tracing::info;

pub const DEFAULT_CLUSTER_CONFIG: &str = "cluster.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Yaml
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub cluster_paths: Vec<PathBuf>,
    pub output_format: OutputFormat,
}

pub fn load_config(args: impl IntoIterator<Item = String>) -> anyhow::Result<Config> {
    let output_format = match env::var("OUTPUT_FORMAT") {
        Ok(value) => parse_output_format(&value)?,
        Err(_) => OutputFormat::default(),
    };

    Ok(Config {
        cluster_paths: get_cluster_paths(args.into_iter().collect(), env::var("CLUSTER_CONFIG")),
        output_format,
    })
}

fn parse_output_format(value: &str) -> anyhow::Result<OutputFormat> {
    value
        .parse()
        .with_context(|| format!("Invalid OUTPUT_FORMAT {}, expected yaml or json", value))
}

fn get_cluster_paths(args: Vec<String>, env_value: Result<String, env::VarError>) -> Vec<PathBuf> {
    if !args.is_empty() {
        return args.into_iter().map(PathBuf::from).collect();
    }

    let path = env_value.unwrap_or_else(|e| {
        info!(
            error = format!("{:?}", e).as_str(),
            "Missing or invalid CLUSTER_CONFIG env var, fallback to {}", DEFAULT_CLUSTER_CONFIG
        );
        DEFAULT_CLUSTER_CONFIG.to_string()
    });

    vec![PathBuf::from(path)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_take_precedence() {
        let paths = get_cluster_paths(
            vec![String::from("a.yaml"), String::from("clusters")],
            Ok(String::from("ignored.yaml")),
        );

        assert_eq!(vec![PathBuf::from("a.yaml"), PathBuf::from("clusters")], paths);
    }

    #[test]
    fn test_env_var_and_fallback() {
        assert_eq!(
            vec![PathBuf::from("from-env.yaml")],
            get_cluster_paths(vec![], Ok(String::from("from-env.yaml")))
        );
        assert_eq!(
            vec![PathBuf::from(DEFAULT_CLUSTER_CONFIG)],
            get_cluster_paths(vec![], Err(env::VarError::NotPresent))
        );
    }

    #[test]
    fn test_output_format_parsing() -> anyhow::Result<()> {
        assert_eq!(OutputFormat::Json, parse_output_format("json")?);
        assert_eq!(OutputFormat::Yaml, parse_output_format("YAML")?);

        let err = parse_output_format("toml").unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid OUTPUT_FORMAT toml"));

        Ok(())
    }
}
