use std::time::Duration;

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub pipeline: PipelineSettings,
    pub spreadsheet: SpreadsheetSettings,
    pub api_keys: ApiKeys,
    pub endpoints: EndpointSettings,
    pub scraper: ScraperSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    /// Run the batch once when the process starts instead of serving the trigger endpoint.
    #[serde(default)]
    pub run_on_startup: bool,
    pub variant: PipelineVariant,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PipelineVariant {
    /// Knowledge panel from the search provider plus website text.
    Search,
    /// LinkedIn company page plus website text.
    Linkedin,
}

#[derive(Deserialize, Clone, Debug)]
pub struct PipelineSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub parallelism: usize,
    pub model: String,
    pub output_column: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl PipelineSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct SpreadsheetSettings {
    pub id: String,
    pub base_url: String,
    /// Bearer token used as is. Expires, so only fit for short runs.
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub service_account: Option<ServiceAccountSettings>,
    pub prompt_sheet: String,
    pub input_sheet: String,
    pub output_sheet: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServiceAccountSettings {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApiKeys {
    pub openai: String,
    pub serpapi: String,
    pub zenrows: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct EndpointSettings {
    pub serpapi: String,
    pub zenrows: String,
    pub openai: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ScraperSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub attempts: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub min_timeout_ms: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub factor: u32,
    /// Unbounded when unset.
    #[serde(default)]
    pub max_timeout_ms: Option<u64>,
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // APP_API_KEYS__OPENAI=sk-... sets `Settings.api_keys.openai`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
