//! Keyword tables used to derive synergy profiles and drive scoring.
//!
//! Every table is plain data so the taxonomy can be extended or audited without touching the
//! scorer. Bump [`TAXONOMY_VERSION`] whenever an entry changes, since scores shift with it.

pub const TAXONOMY_VERSION: u32 = 1;

/// Theme tag -> rules-text / type-line substrings that imply it.
pub const THEME_KEYWORDS: &[(&str, &[&str])] = &[
    ("tokens", &["token", "create", "populate"]),
    (
        "graveyard",
        &["graveyard", "dies", "death trigger", "recursion"],
    ),
    ("artifacts", &["artifact", "equipment", "attach"]),
    ("enchantments", &["enchantment", "aura", "enchant"]),
    ("counters", &["+1/+1 counter", "counter on", "proliferate"]),
    ("spellslinger", &["instant", "sorcery", "spell", "cast"]),
    ("tribal", &["creature type", "share a type"]),
    (
        "voltron",
        &["equipment", "aura", "enchant creature", "attach"],
    ),
    (
        "reanimator",
        &["return", "graveyard to battlefield", "reanimate"],
    ),
    ("sacrifice", &["sacrifice", "dies", "death trigger"]),
];

/// Creature types (and a couple of permanent types) tracked as tribal affiliations.
pub const TRIBES: &[&str] = &[
    "human",
    "elf",
    "goblin",
    "zombie",
    "dragon",
    "angel",
    "demon",
    "vampire",
    "wizard",
    "warrior",
    "merfolk",
    "soldier",
    "knight",
    "artifact",
    "enchantment",
];

/// Mechanic tags detected in rules text or keyword abilities.
pub const MECHANICS: &[&str] = &[
    "draw",
    "discard",
    "sacrifice",
    "counter",
    "+1/+1",
    "token",
    "graveyard",
    "exile",
    "flash",
    "haste",
    "flying",
    "trample",
    "lifelink",
    "deathtouch",
];

/// Template theme -> mechanic substrings that count as relevant for it.
pub const THEME_MECHANICS: &[(&str, &[&str])] = &[
    ("tokens", &["token", "create"]),
    ("graveyard", &["graveyard", "dies", "sacrifice"]),
    ("artifacts", &["artifact"]),
    ("enchantments", &["enchantment", "aura"]),
    ("counters", &["+1/+1", "counter"]),
    ("spellslinger", &["draw", "instant", "sorcery"]),
    ("tribal", &["creature type"]),
    ("sacrifice", &["sacrifice"]),
];

/// Archetype label substring -> keywords that earn the archetype bonus.
pub const ARCHETYPE_GROUPS: &[(&str, &[&str])] = &[
    ("artifact", &["artifact"]),
    ("token", &["token", "create"]),
    ("dragon", &["dragon"]),
    ("tribal", &["creature type", "share"]),
    ("graveyard", &["graveyard", "dies"]),
    ("voltron", &["equipment", "aura", "attach"]),
    ("spellslinger", &["instant", "sorcery", "cast"]),
    ("ramp", &["land", "mana"]),
    ("group hug", &["each player", "draw", "opponent"]),
];

/// Theme -> search fragment sent to the metadata provider.
pub const THEME_SEARCH_QUERIES: &[(&str, &str)] = &[
    ("artifacts", "type:artifact"),
    ("tokens", r#"o:"create" o:"token""#),
    ("graveyard", r#"o:"graveyard""#),
    ("dragons", "type:dragon"),
    ("tribal", r#"o:"creature type""#),
    ("sacrifice", r#"o:"sacrifice""#),
    ("counters", r#"o:"+1/+1 counter""#),
    ("+1/+1", r#"o:"+1/+1 counter""#),
    ("draw", r#"o:"draw""#),
    ("treasures", r#"o:"treasure""#),
    ("clues", r#"o:"clue""#),
    ("enchantments", "type:enchantment"),
    ("spellslinger", "(type:instant OR type:sorcery)"),
    (
        "voltron",
        r#"(type:equipment OR (type:aura o:"enchant creature"))"#,
    ),
    ("eldrazi", "type:eldrazi"),
    ("political", r#"o:"each opponent""#),
];

pub fn mechanics_for_theme(theme: &str) -> Option<&'static [&'static str]> {
    lookup(THEME_MECHANICS, theme)
}

/// Search fragment for a theme; unknown themes fall back to a rules-text match on the theme.
pub fn search_fragment_for_theme(theme: &str) -> String {
    let theme = theme.trim().to_lowercase();
    THEME_SEARCH_QUERIES
        .iter()
        .find(|(key, _)| *key == theme)
        .map(|(_, query)| (*query).to_string())
        .unwrap_or_else(|| format!(r#"o:"{theme}""#))
}

fn lookup(
    table: &'static [(&'static str, &'static [&'static str])],
    key: &str,
) -> Option<&'static [&'static str]> {
    let key = key.trim().to_lowercase();
    table
        .iter()
        .find(|(entry, _)| *entry == key)
        .map(|(_, values)| *values)
}
