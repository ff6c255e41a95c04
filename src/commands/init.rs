use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = r#"# pharmarisk configuration

# Upper bound of each risk level; must be strictly ascending with critical >= 1.0
[thresholds]
low = 0.3
medium = 0.6
high = 0.8
critical = 1.0

[recommendations]
# Probability or impact above this flags a factor for a control review
factor_trigger = 0.7

[report]
# Individual score above which a factor is listed as high risk
high_risk_score = 0.7
trend_window_days = 30
"#;

pub fn init_config(force: bool) -> Result<()> {
    write_default_config(Path::new(CONFIG_FILE_NAME), force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

pub(crate) fn write_default_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(config_path, DEFAULT_CONFIG)?;
    Ok(())
}
