//! The engine's fixed vocabulary.
//!
//! Zones, phases, steps, mana colors, relationship kinds and keywords are
//! closed enums inside the engine. Each term also carries a stable small
//! integer id and a symbolic name so that external tooling (card data
//! loaders, replay viewers, feature encoders) can refer to it.
//!
//! ## ID ranges
//!
//! | Range | Terms |
//! |---|---|
//! | 0 | the player concept |
//! | 100.. | zones |
//! | 200.. | relationship kinds |
//! | 300.. | phases |
//! | 400.. | steps |
//! | 600.. | mana colors |
//! | 1000.. | card types (from the catalog) |
//! | 5000.. | keywords |
//!
//! [`Vocabulary`] is the bijective name↔id table. It is built once, in
//! memory, and handed to the game explicitly.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use crate::cards::CardCatalog;

/// Stable numeric id of a vocabulary term.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VocabId(pub u32);

/// Id of the player concept.
pub const PLAYER_TERM: VocabId = VocabId(0);

/// A closed set of vocabulary terms.
pub trait Term: Copy + Eq + 'static {
    /// Namespace used in symbolic names, e.g. `zone` in `zone:hand`.
    const KIND: &'static str;
    /// Every term, in canonical order.
    const ALL: &'static [Self];

    fn id(self) -> VocabId;
    fn name(self) -> &'static str;

    fn from_id(id: VocabId) -> Option<Self> {
        Self::ALL.iter().copied().find(|term| term.id() == id)
    }
}

macro_rules! terms {
    (
        $(#[$meta:meta])*
        $name:ident : $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $id:literal => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl Term for $name {
            const KIND: &'static str = $kind;
            const ALL: &'static [Self] = &[$(Self::$variant,)+];

            fn id(self) -> VocabId {
                match self {
                    $(Self::$variant => VocabId($id),)+
                }
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

terms! {
    /// Kinds of zone a player owns exactly one of.
    ZoneKind: "zone" {
        Hand = 100 => "hand",
        Battlefield = 101 => "battlefield",
        Library = 102 => "library",
        Graveyard = 103 => "graveyard",
        Exile = 105 => "exile",
    }
}

terms! {
    /// Directed edge kinds in the game graph.
    RelationKind: "relation" {
        /// Player → zone or card.
        Controls = 200 => "controls",
        /// Card → zone. Ordered; exactly one per card.
        IsInZone = 201 => "is_in_zone",
        /// Aura → enchanted creature.
        EnchantedBy = 204 => "enchanted_by",
        /// Blocking creature → attacking creature.
        IsBlocking = 205 => "is_blocking",
    }
}

terms! {
    Phase: "phase" {
        Beginning = 300 => "beginning",
        PreCombatMain = 301 => "precombat_main",
        Combat = 302 => "combat",
        PostCombatMain = 303 => "postcombat_main",
        Ending = 304 => "ending",
    }
}

terms! {
    /// Steps. `Main` is the single step of both main phases.
    Step: "step" {
        Untap = 400 => "untap",
        Upkeep = 401 => "upkeep",
        Draw = 402 => "draw",
        Main = 403 => "main",
        BeginCombat = 404 => "begin_combat",
        DeclareAttackers = 405 => "declare_attackers",
        DeclareBlockers = 406 => "declare_blockers",
        CombatDamage = 407 => "combat_damage",
        EndCombat = 408 => "end_combat",
        End = 409 => "end",
        Cleanup = 410 => "cleanup",
    }
}

terms! {
    /// The five colors plus colorless.
    ManaColor: "mana" {
        White = 600 => "W",
        Blue = 601 => "U",
        Black = 602 => "B",
        Red = 603 => "R",
        Green = 604 => "G",
        Colorless = 605 => "C",
    }
}

terms! {
    Keyword: "keyword" {
        Haste = 5000 => "haste",
        Trample = 5001 => "trample",
        Flying = 5002 => "flying",
        FirstStrike = 5003 => "first_strike",
        Deathtouch = 5004 => "deathtouch",
        Lifelink = 5005 => "lifelink",
        Vigilance = 5006 => "vigilance",
        Reach = 5007 => "reach",
        DoubleStrike = 5008 => "double_strike",
        Menace = 5009 => "menace",
        Defender = 5010 => "defender",
        Intimidate = 5011 => "intimidate",
    }
}

/// Set of keywords as a bitmask over [`Keyword`] discriminants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeywordSet(u16);

impl KeywordSet {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn contains(self, keyword: Keyword) -> bool {
        self.0 & (1 << keyword as u16) != 0
    }

    pub fn insert(&mut self, keyword: Keyword) {
        self.0 |= 1 << keyword as u16;
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Keyword> {
        Keyword::ALL.iter().copied().filter(move |k| self.contains(*k))
    }
}

impl FromIterator<Keyword> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = Keyword>>(iter: I) -> Self {
        let mut set = Self::empty();
        for keyword in iter {
            set.insert(keyword);
        }
        set
    }
}

/// Bijective symbolic-name ↔ id table.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    by_name: FxHashMap<String, VocabId>,
    by_id: FxHashMap<VocabId, String>,
}

impl Vocabulary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every engine term, registered under `kind:name`.
    #[must_use]
    pub fn standard() -> Self {
        let mut vocab = Self::new();
        vocab.insert_unchecked("player".to_string(), PLAYER_TERM);
        vocab.register_terms::<ZoneKind>();
        vocab.register_terms::<RelationKind>();
        vocab.register_terms::<Phase>();
        vocab.register_terms::<Step>();
        vocab.register_terms::<ManaColor>();
        vocab.register_terms::<Keyword>();
        vocab
    }

    /// Add every card type of `catalog` under `card:<name>`.
    pub fn with_catalog(mut self, catalog: &CardCatalog) -> Result<Self> {
        for def in catalog.iter() {
            self.register(format!("card:{}", def.name), VocabId(def.id.0))?;
        }
        Ok(self)
    }

    /// Register one name↔id pair.
    ///
    /// Re-registering an identical pair is a no-op; anything that would
    /// break the bijection is rejected.
    pub fn register(&mut self, name: impl Into<String>, id: VocabId) -> Result<()> {
        let name = name.into();
        match (self.by_name.get(&name), self.by_id.get(&id)) {
            (None, None) => {
                self.insert_unchecked(name, id);
                Ok(())
            }
            (Some(existing), Some(_)) if *existing == id => Ok(()),
            _ => Err(EngineError::VocabularyConflict { name, id: id.0 }),
        }
    }

    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<VocabId> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn name_of(&self, id: VocabId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    fn register_terms<T: Term>(&mut self) {
        for term in T::ALL {
            self.insert_unchecked(format!("{}:{}", T::KIND, term.name()), term.id());
        }
    }

    fn insert_unchecked(&mut self, name: String, id: VocabId) {
        self.by_id.insert(id, name.clone());
        self.by_name.insert(name, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::starter;

    #[test]
    fn test_standard_is_bijective() {
        let vocab = Vocabulary::standard();
        assert_eq!(vocab.by_name.len(), vocab.by_id.len());
        for (name, id) in &vocab.by_name {
            assert_eq!(vocab.name_of(*id), Some(name.as_str()));
        }
    }

    #[test]
    fn test_lookup_by_kind_prefixed_name() {
        let vocab = Vocabulary::standard();
        assert_eq!(vocab.id_of("zone:hand"), Some(VocabId(100)));
        assert_eq!(vocab.id_of("step:main"), Some(Step::Main.id()));
        assert_eq!(vocab.name_of(Keyword::Flying.id()), Some("keyword:flying"));
        assert_eq!(vocab.id_of("player"), Some(PLAYER_TERM));
    }

    #[test]
    fn test_from_id() {
        assert_eq!(Step::from_id(VocabId(406)), Some(Step::DeclareBlockers));
        assert_eq!(ZoneKind::from_id(VocabId(104)), None);
    }

    #[test]
    fn test_conflicting_registration_rejected() {
        let mut vocab = Vocabulary::standard();
        vocab.register("zone:hand", VocabId(100)).unwrap();
        let err = vocab.register("zone:hand", VocabId(999)).unwrap_err();
        assert!(matches!(err, EngineError::VocabularyConflict { .. }));
        assert!(vocab.register("card:other", VocabId(100)).is_err());
    }

    #[test]
    fn test_with_catalog() {
        let vocab = Vocabulary::standard()
            .with_catalog(&starter::catalog())
            .unwrap();
        assert_eq!(vocab.id_of("card:Forest"), Some(VocabId(starter::FOREST.0)));
        assert_eq!(
            vocab.id_of("card:Grizzly Bears"),
            Some(VocabId(starter::GRIZZLY_BEARS.0))
        );
    }

    #[test]
    fn test_keyword_set() {
        let mut set: KeywordSet = [Keyword::Flying, Keyword::Lifelink].into_iter().collect();
        assert!(set.contains(Keyword::Flying));
        assert!(!set.contains(Keyword::Reach));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Keyword::Flying, Keyword::Lifelink]);
        set.clear();
        assert!(set.is_empty());
    }
}
