use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use super::{base, cipher, marks, numeric, spelling, stego, styles, text, web};
use super::{Capability, Transform};
use crate::error::{MtransError, Result};
use crate::settings::{Options, SettingSpec};
use crate::types::{CapabilityKind, TransformMeta};

macro_rules! register_transforms {
    ($($transform:expr),* $(,)?) => {
        fn builtin_transforms() -> Vec<Box<dyn Transform>> {
            vec![
                $(Box::new($transform)),*
            ]
        }

        // Public for testing - generates list of expected transform keys
        pub fn expected_transform_keys() -> Vec<&'static str> {
            vec![
                $(Transform::key(&$transform),)*
            ]
        }
    };
}

// Order matters: the detection pipeline breaks priority ties by registration
// order.
register_transforms! {
    base::Hex,
    base::Binary,
    base::Decimal,
    base::Base64,
    base::Base64Url,
    base::Base32,
    base::Base58,
    web::UrlEncoding,
    web::HtmlEntities,
    numeric::A1Z26,
    numeric::Polybius,
    numeric::Bacon,
    spelling::Nato::new(),
    spelling::Morse::new(),
    stego::InvisibleInk,
    stego::ZeroWidth,
    stego::EmojiSmuggle,
    styles::Style::braille(),
    styles::Style::bold(),
    styles::Style::italic(),
    styles::Style::bold_italic(),
    styles::Style::sans_bold(),
    styles::Style::monospace(),
    styles::Style::double_struck(),
    styles::Style::fullwidth(),
    styles::Style::circled(),
    styles::Style::small_caps(),
    styles::UpsideDown::new(),
    marks::Overlay::strikethrough(),
    marks::Overlay::underline(),
    marks::Zalgo,
    cipher::Caesar,
    cipher::Rot13,
    cipher::Rot47,
    cipher::Atbash,
    cipher::Vigenere,
    cipher::Affine,
    cipher::RailFence,
    text::Reverse,
    text::Leetspeak::new(),
    text::Uppercase,
    text::AlternatingCase,
    text::RemoveVowels,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// A registered transform plus everything about it that is fixed at build time.
pub struct Entry {
    transform: Box<dyn Transform>,
    meta: TransformMeta,
    kind: CapabilityKind,
    settings: Vec<SettingSpec>,
    defaults: Options,
}

impl Entry {
    fn new(transform: Box<dyn Transform>) -> Self {
        let meta = transform.meta();
        let kind = transform.capability().kind();
        let settings = transform.settings();
        let defaults = Options::from_specs(&settings);
        Self {
            transform,
            meta,
            kind,
            settings,
            defaults,
        }
    }

    pub fn key(&self) -> &'static str {
        self.meta.key
    }

    pub fn meta(&self) -> &TransformMeta {
        &self.meta
    }

    pub fn kind(&self) -> CapabilityKind {
        self.kind
    }

    pub fn settings(&self) -> &[SettingSpec] {
        &self.settings
    }

    pub fn default_options(&self) -> &Options {
        &self.defaults
    }

    pub fn transform(&self) -> &dyn Transform {
        self.transform.as_ref()
    }

    pub fn capability(&self) -> Capability<'_> {
        self.transform.capability()
    }
}

pub struct Registry {
    entries: Vec<Entry>,
    name_map: HashMap<String, usize>,
}

impl Registry {
    /// Builds a registry from an explicit list. Keys must be unique.
    pub fn new(transforms: Vec<Box<dyn Transform>>) -> Self {
        let entries: Vec<Entry> = transforms.into_iter().map(Entry::new).collect();

        let mut name_map = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            if let Some(existing) = name_map.insert(entry.key().to_string(), idx) {
                panic!(
                    "Duplicate transform key '{}' at positions {} and {}",
                    entry.key(),
                    existing,
                    idx
                );
            }
        }
        for (idx, entry) in entries.iter().enumerate() {
            name_map.entry(entry.meta.name.to_lowercase()).or_insert(idx);
        }

        debug!(transforms = entries.len(), "registry built");
        Registry { entries, name_map }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_transforms())
    }

    pub fn global() -> &'static Registry {
        REGISTRY.get_or_init(Registry::builtin)
    }

    /// Looks up by key, or by display name, ignoring case.
    pub fn entry(&self, name: &str) -> Result<&Entry> {
        self.name_map
            .get(name)
            .or_else(|| self.name_map.get(name.to_lowercase().as_str()))
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| MtransError::unknown_transform(name))
    }

    pub fn get(&self, name: &str) -> Result<&dyn Transform> {
        self.entry(name).map(Entry::transform)
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn list(&self) -> Vec<TransformMeta> {
        self.entries.iter().map(|e| e.meta.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn test_all_builtin_registered() {
        let registry = Registry::global();
        let keys: Vec<_> = registry.entries().map(Entry::key).collect();
        assert_eq!(keys, expected_transform_keys());
    }

    #[test]
    fn test_lookup_by_key_and_name() {
        let registry = Registry::global();
        assert_eq!(registry.get("hex").unwrap().key(), "hex");
        assert_eq!(registry.get("HEX").unwrap().key(), "hex");
        assert_eq!(registry.get("NATO Phonetic").unwrap().key(), "nato");
        assert!(matches!(registry.get("nope"), Err(MtransError::UnknownTransform { .. })));
    }

    #[test]
    fn test_capability_resolved_at_build() {
        let registry = Registry::global();
        assert_eq!(registry.entry("hex").unwrap().kind(), CapabilityKind::EncodeDecodeDetect);
        assert_eq!(registry.entry("caesar").unwrap().kind(), CapabilityKind::EncodeDecode);
        assert_eq!(registry.entry("uppercase").unwrap().kind(), CapabilityKind::EncodeOnly);
        assert!(!registry.entry("remove_vowels").unwrap().kind().can_decode());
    }

    #[test]
    fn test_every_category_populated() {
        let registry = Registry::global();
        for category in Category::ALL {
            assert!(
                registry.list().iter().any(|m| m.category == category),
                "no transform in category {}",
                category
            );
        }
    }

    #[test]
    fn test_every_transform_encodes_empty_and_previews() {
        for entry in Registry::global().entries() {
            let t = entry.transform();
            let _ = t.encode("", entry.default_options());
            let _ = t.preview("");
            let _ = t.preview("Hello World 123");
        }
    }

    #[test]
    fn test_every_decoder_inverts_encode() {
        // These produce lowercase by construction.
        const CASE_FOLDING: &[&str] = &[
            "a1z26",
            "polybius",
            "bacon",
            "nato",
            "morse",
            "braille",
            "small_caps",
            "upside_down",
            "leetspeak",
        ];
        let text = "Attack at Dawn";
        for entry in Registry::global().entries() {
            let Some(decoder) = entry.capability().decoder() else {
                continue;
            };
            let opts = entry.default_options();
            let encoded = entry.transform().encode(text, opts);
            let decoded = decoder
                .decode(&encoded, opts)
                .unwrap_or_else(|e| panic!("{} failed to decode {:?}: {}", entry.key(), encoded, e));
            let expected = if CASE_FOLDING.contains(&entry.key()) {
                text.to_lowercase()
            } else {
                text.to_string()
            };
            assert_eq!(decoded, expected, "{}", entry.key());
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::new(Vec::new());
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    #[should_panic(expected = "Duplicate transform key")]
    fn test_duplicate_keys_rejected() {
        Registry::new(vec![Box::new(base::Hex), Box::new(base::Hex)]);
    }
}
