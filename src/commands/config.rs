use anyhow::Result;
use owo_colors::OwoColorize;
use sharecal_core::config::SharecalConfig;
use url::Url;

use crate::context::resolve_timezone;

pub fn run(timezone: Option<String>, share_base_url: Option<Url>) -> Result<()> {
    let config_path = SharecalConfig::config_path()?;
    let mut config = SharecalConfig::load()?;

    if timezone.is_some() || share_base_url.is_some() {
        if let Some(tz) = timezone {
            config.timezone = Some(tz);
            // Fail before writing an unknown zone
            config.timezone()?;
        }
        if let Some(url) = share_base_url {
            config.share_base_url = url.to_string();
        }
        config.save_to(&config_path)?;
        println!("{}", "  Saved".green());
    }

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", config.data_path()?.display());

    println!("{}", "Settings".bold());
    println!("  Timezone:        {}", resolve_timezone(&config)?);
    println!("  Share base URL:  {}", config.share_base_url()?);

    Ok(())
}
