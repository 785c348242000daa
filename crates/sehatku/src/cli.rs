use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sehatku",
    version,
    about = "SehatKu AI: BMI-based health advice form backed by Gemini"
)]
pub(crate) struct Args {
    #[arg(long, default_value = "config/sehatku.toml")]
    pub(crate) config: PathBuf,
    #[arg(long, default_value = "logs")]
    pub(crate) log_dir: PathBuf,
    #[arg(long, default_value_t = false)]
    pub(crate) log_to_stderr: bool,
    /// Overrides the model from the config file.
    #[arg(long)]
    pub(crate) model: Option<String>,
    /// Height in centimeters; together with --weight runs once without the TUI.
    #[arg(long, requires = "weight", allow_hyphen_values = true)]
    pub(crate) height: Option<String>,
    /// Weight in kilograms.
    #[arg(long, requires = "height", allow_hyphen_values = true)]
    pub(crate) weight: Option<String>,
    /// Print the headless result as JSON.
    #[arg(long, requires = "height")]
    pub(crate) json: bool,
}

impl Args {
    pub(crate) fn headless_input(&self) -> Option<(String, String)> {
        match (&self.height, &self.weight) {
            (Some(height), Some(weight)) => Some((height.clone(), weight.clone())),
            _ => None,
        }
    }
}
