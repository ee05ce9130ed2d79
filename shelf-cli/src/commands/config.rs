use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelf_lib::{Overrides, SettingSource, Settings, save_settings, settings_path};

use crate::CliError;

/// Show resolved settings and their sources.
pub(crate) fn run_config_show(overrides: &Overrides) -> Result<(), CliError> {
    let path = settings_path();

    log::info!(
        "{}",
        "shelf Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let (settings, sources) = Settings::load(overrides)?;

    let timeout = format!("{}s", settings.steam.timeout.as_secs());
    let fields: &[(&str, Option<String>, &SettingSource)] = &[
        (
            "catalog",
            Some(settings.catalog_path.display().to_string()),
            &sources.catalog_path,
        ),
        (
            "default_status",
            Some(settings.default_status.to_string()),
            &sources.default_status,
        ),
        (
            "api_base",
            Some(settings.steam.api_base.clone()),
            &sources.api_base,
        ),
        ("timeout", Some(timeout), &sources.timeout),
        ("language", settings.steam.language.clone(), &sources.language),
        ("country", settings.steam.country.clone(), &sources.country),
    ];

    for (name, value, source) in fields {
        let source_str = format!("({})", source);
        match value {
            Some(v) => log::info!(
                "  {:<16} {} {}",
                name,
                v,
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            ),
            None => log::info!(
                "  {:<16} {}",
                name,
                "-".if_supports_color(Stdout, |t| t.dimmed()),
            ),
        }
    }

    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", settings_path().display());
    Ok(())
}

/// Write the currently resolved settings to the settings file.
pub(crate) fn run_config_init(overrides: &Overrides, force: bool) -> Result<(), CliError> {
    let path = settings_path();
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let (settings, _) = Settings::load(overrides)?;
    save_settings(&path, &settings.to_file())?;

    log::info!(
        "{} Settings saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
