use crate::config::toml_config::AppConfig;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "course-registry")]
#[command(about = "Course and enrollment API with a per-course student cap")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "course-registry.toml")]
    pub config: String,

    /// Override server.host from config
    #[arg(long)]
    pub host: Option<String>,

    /// Override server.port from config
    #[arg(long)]
    pub port: Option<u16>,

    /// Override enrollment.max_students_per_course from config
    #[arg(long)]
    pub max_students: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Validate the configuration, print a summary and exit
    #[arg(long)]
    pub check_config: bool,
}

impl CliArgs {
    /// Command-line flags win over the file and the environment.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(limit) = self.max_students {
            config.enrollment.max_students_per_course = limit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_given_flags() {
        let args = CliArgs::parse_from(["course-registry", "--port", "9100", "--max-students", "5"]);
        let mut config = AppConfig::default();

        args.apply_overrides(&mut config);

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.max_students_per_course(), 5);
        assert_eq!(args.config, "course-registry.toml");
    }
}
