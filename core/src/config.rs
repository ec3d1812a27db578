use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;
use hashbrown::{HashMap, HashSet};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::{GalleryError, Result};

pub const DEFAULT_EXTENSION: &str = "png";
pub const DEFAULT_IMAGES_PER_ROW: u32 = 6;
pub const DEFAULT_IMAGES_PER_ROW_MOBILE: u32 = 3;

/// JSON object whose entries are kept in document order.
#[derive(Clone, Debug, PartialEq)]
struct Ordered<V>(Vec<(String, V)>);

impl<V> Default for Ordered<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Ordered<V> {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = Ordered<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> core::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(Ordered(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    #[serde(default)]
    extension: Option<String>,
    #[serde(default)]
    images_per_row: Option<u32>,
    #[serde(default)]
    images_per_row_mobile: Option<u32>,
    images: Ordered<Vec<String>>,
    #[serde(default)]
    special_images: Option<Ordered<RawRule>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRule {
    image: String,
    probability: f64,
    min_count: u32,
}

/// Ordered list of images, each tagged with the name of the mask set it uses.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageCatalog {
    images: Vec<String>,
    mask_sets: HashMap<String, String>,
}

impl ImageCatalog {
    /// Flattens `(mask set, images)` groups, keeping group order then image order.
    pub fn from_groups<G, S, N>(groups: G) -> Result<Self>
    where
        G: IntoIterator<Item = (S, N)>,
        S: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        let mut images = Vec::new();
        let mut mask_sets = HashMap::new();

        for (mask_set, names) in groups {
            let mask_set = mask_set.into();
            for name in names {
                let name = name.into();
                if mask_sets.contains_key(&name) {
                    return Err(GalleryError::DuplicateImage(name));
                }
                mask_sets.insert(name.clone(), mask_set.clone());
                images.push(name);
            }
        }

        if images.is_empty() {
            return Err(GalleryError::EmptyCatalog);
        }

        Ok(Self { images, mask_sets })
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn first(&self) -> &str {
        &self.images[0]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.mask_sets.contains_key(name)
    }

    pub fn mask_set_of(&self, name: &str) -> Option<&str> {
        self.mask_sets.get(name).map(String::as_str)
    }
}

/// A bonus image that may replace a regular reveal once enough reveals passed since it last showed up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialRule {
    pub id: String,
    pub image: String,
    pub probability: f64,
    pub min_count: u32,
}

impl SpecialRule {
    pub fn new(
        id: impl Into<String>,
        image: impl Into<String>,
        probability: f64,
        min_count: u32,
    ) -> Result<Self> {
        let id = id.into();
        if !(0.0..=1.0).contains(&probability) {
            return Err(GalleryError::InvalidProbability(id));
        }
        Ok(Self {
            id,
            image: image.into(),
            probability,
            min_count,
        })
    }

    pub fn is_eligible(&self, count: u32) -> bool {
        count >= self.min_count
    }
}

/// Static description of the game, loaded once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryConfig {
    extension: String,
    images_per_row: u32,
    images_per_row_mobile: u32,
    catalog: ImageCatalog,
    rules: Vec<SpecialRule>,
}

impl GalleryConfig {
    pub fn new(catalog: ImageCatalog, rules: Vec<SpecialRule>) -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_owned(),
            images_per_row: DEFAULT_IMAGES_PER_ROW,
            images_per_row_mobile: DEFAULT_IMAGES_PER_ROW_MOBILE,
            catalog,
            rules,
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = normalize_extension(Some(extension));
        self
    }

    pub fn with_images_per_row(mut self, desktop: u32, mobile: u32) -> Self {
        self.images_per_row = non_zero_or(Some(desktop), DEFAULT_IMAGES_PER_ROW);
        self.images_per_row_mobile = non_zero_or(Some(mobile), DEFAULT_IMAGES_PER_ROW_MOBILE);
        self
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(text)
            .map_err(|err| GalleryError::InvalidConfig(err.to_string()))?;

        let catalog = ImageCatalog::from_groups(raw.images.0)?;
        let rules = raw
            .special_images
            .unwrap_or_default()
            .0
            .into_iter()
            .map(|(id, rule)| SpecialRule::new(id, rule.image, rule.probability, rule.min_count))
            .collect::<Result<Vec<_>>>()?;

        check_unique_ids(&rules)?;

        Ok(Self {
            extension: normalize_extension(raw.extension.as_deref()),
            images_per_row: non_zero_or(raw.images_per_row, DEFAULT_IMAGES_PER_ROW),
            images_per_row_mobile: non_zero_or(
                raw.images_per_row_mobile,
                DEFAULT_IMAGES_PER_ROW_MOBILE,
            ),
            catalog,
            rules,
        })
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn images_per_row(&self) -> u32 {
        self.images_per_row
    }

    pub fn images_per_row_mobile(&self) -> u32 {
        self.images_per_row_mobile
    }

    pub fn catalog(&self) -> &ImageCatalog {
        &self.catalog
    }

    /// Special rules in declaration order.
    pub fn rules(&self) -> &[SpecialRule] {
        &self.rules
    }

    pub fn rule(&self, id: &str) -> Option<&SpecialRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn image_src(&self, name: &str) -> String {
        format!("{}.{}", name, self.extension)
    }

    /// Inverse of [`Self::image_src`]; names without the extension are returned as is.
    pub fn image_name<'a>(&self, src: &'a str) -> &'a str {
        src.strip_suffix(self.extension.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
            .unwrap_or(src)
    }
}

fn check_unique_ids(rules: &[SpecialRule]) -> Result<()> {
    let mut seen = HashSet::with_capacity(rules.len());
    for rule in rules {
        if !seen.insert(rule.id.as_str()) {
            return Err(GalleryError::InvalidConfig(format!(
                "special image {:?} is declared more than once",
                rule.id
            )));
        }
    }
    Ok(())
}

fn normalize_extension(extension: Option<&str>) -> String {
    match extension.map(|ext| ext.trim().trim_start_matches('.')) {
        Some(ext) if !ext.is_empty() => ext.to_owned(),
        _ => DEFAULT_EXTENSION.to_owned(),
    }
}

fn non_zero_or(value: Option<u32>, default: u32) -> u32 {
    value.filter(|&value| value > 0).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const SAMPLE: &str = r#"{
        "extension": ".jpg",
        "imagesPerRow": 8,
        "images": {
            "4syllables": ["zebra", "apple"],
            "3syllables": ["mango"]
        },
        "specialImages": {
            "zeta": { "image": "golden", "probability": 0.25, "minCount": 4 },
            "alpha": { "image": "silver", "probability": 1.0, "minCount": 0 }
        }
    }"#;

    #[test]
    fn parse_keeps_document_order() {
        let config = GalleryConfig::from_json(SAMPLE).unwrap();

        assert_eq!(config.catalog().images(), ["zebra", "apple", "mango"]);
        let ids: Vec<_> = config.rules().iter().map(|rule| rule.id.as_str()).collect();
        assert_eq!(ids, ["zeta", "alpha"]);
        assert_eq!(config.catalog().mask_set_of("apple"), Some("4syllables"));
        assert_eq!(config.catalog().mask_set_of("mango"), Some("3syllables"));
    }

    #[test]
    fn parse_applies_defaults() {
        let config = GalleryConfig::from_json(SAMPLE).unwrap();

        assert_eq!(config.extension(), "jpg");
        assert_eq!(config.images_per_row(), 8);
        assert_eq!(config.images_per_row_mobile(), DEFAULT_IMAGES_PER_ROW_MOBILE);

        let minimal =
            GalleryConfig::from_json(r#"{"extension": "", "imagesPerRow": 0, "images": {"x": ["a"]}}"#)
                .unwrap();
        assert_eq!(minimal.extension(), DEFAULT_EXTENSION);
        assert_eq!(minimal.images_per_row(), DEFAULT_IMAGES_PER_ROW);
        assert!(minimal.rules().is_empty());
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            GalleryConfig::from_json("{"),
            Err(GalleryError::InvalidConfig(_))
        ));
        assert_eq!(
            GalleryConfig::from_json(r#"{"images": {}}"#),
            Err(GalleryError::EmptyCatalog)
        );
        assert_eq!(
            GalleryConfig::from_json(r#"{"images": {"a": ["x"], "b": ["x"]}}"#),
            Err(GalleryError::DuplicateImage("x".to_owned()))
        );
        assert_eq!(
            GalleryConfig::from_json(
                r#"{"images": {"a": ["x"]}, "specialImages": {"s": {"image": "y", "probability": 1.5, "minCount": 0}}}"#
            ),
            Err(GalleryError::InvalidProbability("s".to_owned()))
        );
        assert!(matches!(
            GalleryConfig::from_json(
                r#"{"images": {"a": ["x"]}, "specialImages": {"s": {"image": "y", "probability": 0.5}}}"#
            ),
            Err(GalleryError::InvalidConfig(_))
        ));
        assert!(matches!(
            GalleryConfig::from_json(
                r#"{"images": {"a": ["x"]}, "specialImages": {
                    "s": {"image": "y", "probability": 0.5, "minCount": 1},
                    "s": {"image": "z", "probability": 0.1, "minCount": 2}
                }}"#
            ),
            Err(GalleryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rules_are_looked_up_by_id() {
        let config = GalleryConfig::from_json(SAMPLE).unwrap();

        let alpha = config.rule("alpha").unwrap();
        assert_eq!(alpha.image, "silver");
        assert_eq!(alpha.min_count, 0);
        assert!(alpha.is_eligible(0));
        assert!(!config.rule("zeta").unwrap().is_eligible(3));
        assert_eq!(config.rule("beta"), None);
    }

    #[test]
    fn builder_falls_back_on_zero_row_sizes() {
        let catalog = ImageCatalog::from_groups(vec![("3syllables", vec!["cat"])]).unwrap();
        let config = GalleryConfig::new(catalog, Vec::new());

        let wide = config.clone().with_images_per_row(10, 4);
        assert_eq!((wide.images_per_row(), wide.images_per_row_mobile()), (10, 4));

        let zero = config.with_images_per_row(0, 0);
        assert_eq!(
            (zero.images_per_row(), zero.images_per_row_mobile()),
            (DEFAULT_IMAGES_PER_ROW, DEFAULT_IMAGES_PER_ROW_MOBILE)
        );
    }

    #[test]
    fn image_src_and_name_are_inverse() {
        let catalog = ImageCatalog::from_groups(vec![("3syllables", vec!["cat"])]).unwrap();
        let config = GalleryConfig::new(catalog, Vec::new()).with_extension("webp");

        assert_eq!(config.image_src("cat"), "cat.webp");
        assert_eq!(config.image_name("cat.webp"), "cat");
        assert_eq!(config.image_name("cat"), "cat");
        assert_eq!(config.image_name("catwebp"), "catwebp");
    }
}
