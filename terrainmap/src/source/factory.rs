//! Source construction from configuration.

use std::fmt;
use std::str::FromStr;

use super::{MapboxTerrainSource, ReqwestClient, SourceError, TerrariumSource, TileSource};

/// Which tile service to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// Mapbox Terrain-RGB, requires an access token.
    Mapbox { access_token: String },
    /// AWS Open Data Terrarium, no authentication.
    Terrarium,
}

impl SourceConfig {
    pub fn mapbox(access_token: impl Into<String>) -> Self {
        SourceConfig::Mapbox {
            access_token: access_token.into(),
        }
    }

    /// Short identifier used in config files and on the command line.
    pub fn kind(&self) -> SourceKind {
        match self {
            SourceConfig::Mapbox { .. } => SourceKind::Mapbox,
            SourceConfig::Terrarium => SourceKind::Terrarium,
        }
    }
}

/// Source identifier without credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    #[default]
    Mapbox,
    Terrarium,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Mapbox => "mapbox",
            SourceKind::Terrarium => "terrarium",
        }
    }

    /// Combines the kind with an optional token into a full config.
    pub fn into_config(self, access_token: Option<String>) -> Result<SourceConfig, SourceError> {
        match self {
            SourceKind::Mapbox => {
                let token = access_token.filter(|t| !t.trim().is_empty()).ok_or_else(|| {
                    SourceError::Config(
                        "Mapbox requires an access token. \
                         Set access_token in config.ini or use --token"
                            .to_string(),
                    )
                })?;
                Ok(SourceConfig::mapbox(token))
            }
            SourceKind::Terrarium => Ok(SourceConfig::Terrarium),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mapbox" => Ok(SourceKind::Mapbox),
            "terrarium" | "aws" => Ok(SourceKind::Terrarium),
            other => Err(SourceError::Config(format!(
                "Unknown tile source '{}' (expected mapbox or terrarium)",
                other
            ))),
        }
    }
}

/// Builds a boxed source backed by a real HTTP client.
pub fn create_source(
    config: &SourceConfig,
    timeout_secs: u64,
) -> Result<Box<dyn TileSource>, SourceError> {
    let client = ReqwestClient::with_timeout(timeout_secs)?;

    let source: Box<dyn TileSource> = match config {
        SourceConfig::Mapbox { access_token } => {
            Box::new(MapboxTerrainSource::new(client, access_token.clone())?)
        }
        SourceConfig::Terrarium => Box::new(TerrariumSource::new(client)),
    };

    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ElevationEncoding;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("mapbox".parse::<SourceKind>().unwrap(), SourceKind::Mapbox);
        assert_eq!(
            " Terrarium ".parse::<SourceKind>().unwrap(),
            SourceKind::Terrarium
        );
        assert!("bing".parse::<SourceKind>().is_err());
    }

    #[test]
    fn test_kind_roundtrips_through_str() {
        for kind in [SourceKind::Mapbox, SourceKind::Terrarium] {
            assert_eq!(kind.as_str().parse::<SourceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_mapbox_without_token_is_config_error() {
        assert!(matches!(
            SourceKind::Mapbox.into_config(None),
            Err(SourceError::Config(_))
        ));
        assert!(matches!(
            SourceKind::Mapbox.into_config(Some(String::new())),
            Err(SourceError::Config(_))
        ));
        assert_eq!(
            SourceKind::Mapbox.into_config(Some("pk.x".into())).unwrap(),
            SourceConfig::mapbox("pk.x")
        );
    }

    #[test]
    fn test_create_source() {
        let source = create_source(&SourceConfig::Terrarium, 5).unwrap();
        assert_eq!(source.encoding(), ElevationEncoding::Terrarium);

        let source = create_source(&SourceConfig::mapbox("pk.x"), 5).unwrap();
        assert_eq!(source.encoding(), ElevationEncoding::TerrainRgb);
        assert_eq!(SourceConfig::mapbox("pk.x").kind(), SourceKind::Mapbox);
    }
}
