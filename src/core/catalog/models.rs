//! Wire shapes returned by the catalog service, plus the small derivations
//! the views need (numeric ids, artwork locators, display units).

use serde::{Deserialize, Serialize};

/// Image repository path used for card and game artwork.
pub const DEFAULT_ARTWORK_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

/// Upper bound of the stat chart's horizontal axis.
pub const STAT_CHART_MAX: u32 = 200;

// ── List shapes ─────────────────────────────────────────────────────────────

/// One entry of a paginated list or a type membership list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListEntry {
    pub name: String,
    /// Opaque locator of the entry's detail resource.
    pub url: String,
}

impl ListEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Numeric id parsed from the reference locator, if it has one.
    pub fn id(&self) -> Option<u32> {
        id_from_reference(&self.url)
    }
}

/// A filter category (`fire`, `water`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub name: String,
    pub url: String,
}

/// Response of `GET /pokemon?limit=&offset=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<ListEntry>,
}

/// Response of `GET /type`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TypesResponse {
    pub results: Vec<TypeEntry>,
}

/// Response of `GET /type/<name>`; only the membership is read.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TypeDetailResponse {
    pub pokemon: Vec<TypeMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TypeMember {
    pub pokemon: ListEntry,
}

impl TypeDetailResponse {
    pub fn into_members(self) -> Vec<ListEntry> {
        self.pokemon.into_iter().map(|m| m.pokemon).collect()
    }
}

// ── Detail shapes ───────────────────────────────────────────────────────────

/// A `{ name, url }` pair as the service nests it inside detail records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtworkSprite {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: ArtworkSprite,
    #[serde(default)]
    pub dream_world: ArtworkSprite,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValue {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
}

/// Full record from `GET /pokemon/<name-or-id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDetail {
    pub id: u32,
    pub name: String,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatValue>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

impl EntryDetail {
    /// Official artwork, falling back to the default front sprite.
    pub fn artwork_url(&self) -> Option<&str> {
        self.sprites
            .other
            .official_artwork
            .front_default
            .as_deref()
            .or(self.sprites.front_default.as_deref())
    }

    /// Name of the first type slot; drives the header colour.
    pub fn primary_type(&self) -> &str {
        self.types
            .first()
            .map(|t| t.kind.name.as_str())
            .unwrap_or("normal")
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.kind.name.as_str())
    }

    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }
}

// ── Derivations ─────────────────────────────────────────────────────────────

/// Last non-empty path segment of a reference locator, parsed as an id.
///
/// `https://pokeapi.co/api/v2/pokemon/25/` → `Some(25)`.
pub fn id_from_reference(url: &str) -> Option<u32> {
    url.split('/')
        .filter(|s| !s.is_empty())
        .next_back()
        .and_then(|s| s.parse().ok())
}

/// Artwork locator for a numeric id under the given repository path.
pub fn artwork_url(base: &str, id: u32) -> String {
    format!("{}/{id}.png", base.trim_end_matches('/'))
}

/// `#025`-style label; ids wider than three digits are left as is.
pub fn padded_id(id: u32) -> String {
    format!("#{id:03}")
}

/// Replaces the first `-` with a space (`special-attack` → `special attack`).
pub fn humanize(name: &str) -> String {
    name.replacen('-', " ", 1)
}

/// Upper-cased stat axis label.
pub fn stat_label(name: &str) -> String {
    humanize(name).to_uppercase()
}

/// Capitalizes the first character for display.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
