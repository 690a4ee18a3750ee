// Configuration module: credentials, endpoint URLs and the region menu
// are collected here once at startup and injected into the rest of the
// crate. See `Config::from_env`.

use std::env;

/// Default OpenSky OAuth2 token endpoint (client-credentials flow).
pub const DEFAULT_TOKEN_URL: &str =
    "https://auth.opensky-network.org/auth/realms/opensky-network/protocol/openid-connect/token";

/// Default OpenSky state-vectors endpoint.
pub const DEFAULT_STATES_URL: &str = "https://opensky-network.org/api/states/all";

/// OAuth2 client-credentials pair. Either string may be empty; the token
/// request checks completeness before going to the network.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Credentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Both halves of the pair are present.
    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

/// Search box sent to the states endpoint. Bounds are passed through as
/// given; callers keep min <= max on each axis.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

/// One selectable search area: a display name plus its bounding box.
#[derive(Debug, Clone)]
pub struct Region {
    pub name: String,
    pub bounds: BoundingBox,
}

impl Region {
    fn new(name: &str, min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Region {
            name: name.to_string(),
            bounds: BoundingBox {
                min_lat,
                min_lon,
                max_lat,
                max_lon,
            },
        }
    }
}

/// Everything the rest of the crate needs to run once.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub token_url: String,
    pub states_url: String,
    pub regions: Vec<Region>,
}

impl Config {
    /// Create a Config from the environment. Credentials come from
    /// `OPENSKY_CLIENT_ID` / `OPENSKY_CLIENT_SECRET`; the endpoint URLs
    /// can be overridden with `OPENSKY_TOKEN_URL` / `OPENSKY_API_URL`.
    /// Missing credentials are left empty here and surface as a typed
    /// failure when the token is requested.
    pub fn from_env() -> Self {
        Config {
            credentials: Credentials {
                client_id: env::var("OPENSKY_CLIENT_ID").unwrap_or_default(),
                client_secret: env::var("OPENSKY_CLIENT_SECRET").unwrap_or_default(),
            },
            token_url: env::var("OPENSKY_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.into()),
            states_url: env::var("OPENSKY_API_URL").unwrap_or_else(|_| DEFAULT_STATES_URL.into()),
            regions: default_regions(),
        }
    }
}

/// The built-in search areas offered by the menu.
pub fn default_regions() -> Vec<Region> {
    vec![
        Region::new("Greater Gothenburg", 57.55, 11.70, 57.85, 12.35),
        Region::new("Västra Götaland County", 57.2, 10.8, 59.8, 14.5),
        Region::new("Stockholm Area", 59.10, 17.70, 59.70, 18.80),
    ]
}
