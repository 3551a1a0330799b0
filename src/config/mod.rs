pub mod builtin;
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::TomlConfig;
    use crate::app::report::ExportSettings;
    use crate::core::evaluator::{EvaluationSettings, DEFAULT_TARGET_SERVINGS, DEFAULT_TRIALS};
    use crate::core::ConfigProvider;
    use crate::domain::model::{KnownServings, ReportFormat};
    use clap::Parser;

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "recipe-scaler")]
    #[command(about = "Compare recipe scaling heuristics against recorded serving sizes")]
    pub struct CliConfig {
        /// TOML file with recipes and evaluation settings
        #[arg(short, long)]
        pub config: Option<String>,

        /// Number of evaluation trials
        #[arg(long)]
        pub trials: Option<usize>,

        /// Known serving sizes used as anchors, e.g. 1,3
        #[arg(long)]
        pub known: Option<KnownServings>,

        /// Serving sizes to predict, e.g. 2,4
        #[arg(long, value_delimiter = ',')]
        pub targets: Vec<u32>,

        /// Directory for exported report files
        #[arg(long)]
        pub output_path: Option<String>,

        #[arg(long, value_enum, value_delimiter = ',')]
        pub formats: Vec<ReportFormat>,

        /// Print the report as JSON instead of text
        #[arg(long)]
        pub json: bool,

        /// Skip the scaling demonstration
        #[arg(long)]
        pub no_demo: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        /// Emit logs as JSON lines
        #[arg(long)]
        pub log_json: bool,
    }

    const DEFAULT_FORMATS: [ReportFormat; 2] = [ReportFormat::Csv, ReportFormat::Json];

    impl CliConfig {
        /// Settings from the file (when given) with command line values on top.
        pub fn resolve(&self, file: Option<&TomlConfig>) -> (EvaluationSettings, ExportSettings) {
            let (mut settings, mut export) = match file {
                Some(file) => (
                    EvaluationSettings::from_provider(file),
                    ExportSettings {
                        path: file.output_path().map(str::to_string),
                        formats: file.output_formats().to_vec(),
                    },
                ),
                None => (
                    EvaluationSettings::from_provider(self),
                    ExportSettings {
                        path: self.output_path().map(str::to_string),
                        formats: self.output_formats().to_vec(),
                    },
                ),
            };

            if let Some(trials) = self.trials {
                settings.trials = trials;
            }
            if let Some(known) = self.known {
                settings.known = known;
            }
            if !self.targets.is_empty() {
                settings.targets = self.targets.clone();
            }
            if let Some(path) = &self.output_path {
                export.path = Some(path.clone());
            }
            if !self.formats.is_empty() {
                export.formats = self.formats.clone();
            }

            (settings, export)
        }
    }

    impl ConfigProvider for CliConfig {
        fn trials(&self) -> usize {
            self.trials.unwrap_or(DEFAULT_TRIALS)
        }

        fn known_servings(&self) -> KnownServings {
            self.known.unwrap_or_default()
        }

        fn target_servings(&self) -> &[u32] {
            if self.targets.is_empty() {
                &DEFAULT_TARGET_SERVINGS
            } else {
                &self.targets
            }
        }

        fn output_path(&self) -> Option<&str> {
            self.output_path.as_deref()
        }

        fn output_formats(&self) -> &[ReportFormat] {
            if self.formats.is_empty() {
                &DEFAULT_FORMATS
            } else {
                &self.formats
            }
        }
    }

}
