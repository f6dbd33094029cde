use folio_core::{init_site_config, site_config, ConfigError, SiteConfig, Theme};

#[test]
fn site_config_initializes_once_and_rejects_conflicts() {
    assert_eq!(site_config(), SiteConfig::default());

    let mut config = SiteConfig::default();
    config.particles.count = 24;
    config.theme = Theme::Light;

    let active = init_site_config(config.clone()).unwrap();
    assert_eq!(active.particles.count, 24);
    init_site_config(config.clone()).unwrap();

    let err = init_site_config(SiteConfig::default()).unwrap_err();
    assert_eq!(err, ConfigError::Conflict);
    assert_eq!(site_config(), config);
}
