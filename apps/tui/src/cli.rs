use clap::Parser;

#[derive(Debug, Parser, Default)]
#[command(name = "recipe_browser", version, about = "Browse TheMealDB and local recipes")]
pub struct CliArgs {
    /// Print the listing and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the MealDB API base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the local recipe dataset (path or http(s) URL)
    #[arg(long, value_name = "PATH|URL")]
    pub local: Option<String>,

    /// Write logs to a file instead of stderr
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Headless: area to select before printing
    #[arg(long, value_name = "LABEL")]
    pub area: Option<String>,

    /// Headless: search term applied after the area
    #[arg(long, value_name = "TERM")]
    pub search: Option<String>,

    /// Headless: search MealDB by name instead of the loaded catalog
    #[arg(long = "remote-search", value_name = "TERM", conflicts_with = "search")]
    pub remote_search: Option<String>,

    /// Headless: resolve and print one recipe by id
    #[arg(long, value_name = "ID")]
    pub detail: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("MEALDB_BASE_URL", url);
        }
        if let Some(local) = &self.local {
            std::env::set_var("LOCAL_RECIPES", local);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn wants_headless(&self) -> bool {
        self.headless || self.json || self.detail.is_some() || self.remote_search.is_some()
    }
}
