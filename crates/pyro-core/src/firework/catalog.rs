//! The closed set of firework kinds and their per-kind parameters.
//!
//! Everything that differs between kinds only by numbers lives in
//! [`CATALOG`], indexed by the kind's discriminant. Bespoke behavior (dragon
//! heads, the double bomb's second stage, emitters, batteries) is selected
//! from [`KindSpec::family`] and the kind itself.

use std::fmt;
use std::str::FromStr;

use pyro_platform::{ExplosionKind, LaunchWeight, SoundCue};
use serde::{Deserialize, Serialize};

use super::blast::{self, Blast, Shade, Tint};
use crate::color::Color;
use crate::error::UnknownKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireworkKind {
    Rocket,
    FlowerShot,
    IndianSkyshot,
    JapaneseSkyshot,
    CrossSkyShot,
    Cyclone,
    Skyshot,
    Dragon,
    Twinkler,
    Palm,
    MegaShot,
    Anar,
    FlowerPot,
    Chakri,
    FountainShot,
    SmokeBomb,
    Arc,
    Sutli,
    Garland,
    DoubleBomb,
    PetrolBomb,
    Ladi,
    C4,
    FlashBang,
    SmokeGrenade,
    Molotov,
    Double,
    SparkBomb,
    MoonShot,
    #[serde(rename = "double_bomb_2")]
    DoubleBombStage2,
}

/// Grouping used by pickers. `Internal` kinds are never offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Aerial,
    Ground,
    Bombs,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Flies up and bursts at its apex or target height.
    Ascending,
    /// Sits on the ground and burns down a fuse.
    Stationary,
    /// Sits on the ground and fires a fixed number of shells.
    MultiShot,
}

/// Spark dropped behind a rising shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trail {
    pub chance: f64,
    pub tint: Tint,
    pub life: i32,
    /// Multiplier of the pixel size, scaled again by the shell's body size.
    pub size: f32,
    pub gravity: f32,
    pub flicker: bool,
}

impl Trail {
    const fn new(chance: f64, tint: Tint, life: i32, size: f32) -> Self {
        Self {
            chance,
            tint,
            life,
            size,
            gravity: 0.02,
            flicker: false,
        }
    }

    const fn gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    const fn flickering(mut self) -> Self {
        self.flicker = true;
        self
    }
}

const SMOKY_TRAIL: Trail = Trail::new(
    0.3,
    Tint::Weighted(&[
        (0.5, Shade::Grey { from: 30.0, spread: 20.0 }),
        (0.5, Shade::Fixed(Color::rgb(0x55, 0x55, 0x55))),
    ]),
    15,
    1.0,
);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindSpec {
    pub kind: FireworkKind,
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub family: Family,
    /// Played once when the firework is placed or launched.
    pub launch: Option<SoundCue>,
    pub trail: Option<Trail>,
    /// Burning on the ground: the watcher keeps clear.
    pub ground: bool,
    /// Loud enough to make the watcher cower just before it goes off.
    pub loud: bool,
    /// Frames of life for ground kinds, sampled from the inclusive range.
    pub fuse: (i32, i32),
    pub blast: Option<&'static Blast>,
}

impl KindSpec {
    const fn new(
        kind: FireworkKind,
        id: &'static str,
        name: &'static str,
        category: Category,
        family: Family,
    ) -> Self {
        Self {
            kind,
            id,
            name,
            category,
            family,
            launch: None,
            trail: None,
            ground: false,
            loud: false,
            fuse: (100, 100),
            blast: None,
        }
    }

    const fn aerial(
        kind: FireworkKind,
        id: &'static str,
        name: &'static str,
        weight: LaunchWeight,
    ) -> Self {
        let mut spec = Self::new(kind, id, name, Category::Aerial, Family::Ascending);
        spec.launch = Some(SoundCue::launch(weight));
        spec.trail = Some(SMOKY_TRAIL);
        spec
    }

    const fn placed(
        kind: FireworkKind,
        id: &'static str,
        name: &'static str,
        category: Category,
        family: Family,
    ) -> Self {
        let mut spec = Self::new(kind, id, name, category, family);
        spec.ground = true;
        spec
    }

    const fn internal(mut self) -> Self {
        self.category = Category::Internal;
        self
    }

    const fn cue(mut self, cue: SoundCue) -> Self {
        self.launch = Some(cue);
        self
    }

    const fn silent(mut self) -> Self {
        self.launch = None;
        self
    }

    const fn trail(mut self, trail: Trail) -> Self {
        self.trail = Some(trail);
        self
    }

    const fn loud(mut self) -> Self {
        self.loud = true;
        self
    }

    const fn not_ground(mut self) -> Self {
        self.ground = false;
        self
    }

    const fn fuse(mut self, min: i32, max: i32) -> Self {
        self.fuse = (min, max);
        self
    }

    const fn blast(mut self, blast: &'static Blast) -> Self {
        self.blast = Some(blast);
        self
    }
}

use Category::{Bombs, Ground};
use Family::{MultiShot, Stationary};
use FireworkKind as K;

const STD: LaunchWeight = LaunchWeight::Standard;
const HEAVY: LaunchWeight = LaunchWeight::Heavy;
const PRIMED: SoundCue = SoundCue::explosion(ExplosionKind::Pop, 0.1);
const FIZZ: SoundCue = SoundCue::sparkle(0.1);
const SMOKE_GREY: Shade = Shade::Grey {
    from: 40.0,
    spread: 20.0,
};
const BLOSSOM: Shade = Shade::Fixed(Color::rgb(0xff, 0xb7, 0xc5));
const GILT: Shade = Shade::Fixed(Color::GOLD);
const MARIGOLD: Shade = Shade::Fixed(Color::rgb(0xff, 0xcc, 0x00));
const TEAL: Shade = Shade::Fixed(Color::rgb(0x00, 0xff, 0xcc));

/// One entry per [`FireworkKind`], in declaration order.
pub static CATALOG: [KindSpec; FireworkKind::ALL.len()] = [
    KindSpec::aerial(K::Rocket, "rocket", "Rocket", STD)
        .trail(Trail::new(0.6, Tint::Solid(SMOKE_GREY), 20, 1.0))
        .blast(&blast::ROCKET),
    KindSpec::aerial(K::FlowerShot, "flower_shot", "Flower Shot", STD)
        .trail(Trail::new(0.4, Tint::Solid(BLOSSOM), 20, 1.0))
        .blast(&blast::FLOWER),
    KindSpec::aerial(K::IndianSkyshot, "indian_skyshot", "Indian Skyshot", HEAVY)
        .trail(Trail::new(0.5, Tint::Solid(MARIGOLD), 20, 1.0).flickering())
        .blast(&blast::INDIAN),
    KindSpec::aerial(
        K::JapaneseSkyshot,
        "japanese_skyshot",
        "Japanese Skyshot",
        HEAVY,
    )
    .trail(Trail::new(0.4, Tint::Solid(GILT), 25, 1.2))
    .blast(&blast::JAPANESE),
    KindSpec::aerial(K::CrossSkyShot, "cross_sky_shot", "Cross Sky Shot", STD)
        .trail(Trail::new(
            0.5,
            Tint::Solid(Shade::Hue {
                shift: -15.0,
                spread: 30.0,
                s: 100.0,
                l: 60.0,
            }),
            20,
            0.8,
        ))
        .fuse(80, 139)
        .blast(&blast::CROSS),
    KindSpec::aerial(K::Cyclone, "cyclone", "Cyclone", STD)
        .trail(Trail::new(0.8, Tint::Solid(TEAL), 15, 0.8).gravity(0.05))
        .blast(&blast::CYCLONE),
    KindSpec::aerial(K::Skyshot, "skyshot", "Skyshot", STD).blast(&blast::SKYSHOT),
    KindSpec::aerial(K::Dragon, "dragon", "Dragon", HEAVY)
        .trail(Trail::new(
            0.8,
            Tint::Solid(Shade::Band {
                from: 40.0,
                spread: 20.0,
                s: 100.0,
                l: 50.0,
            }),
            25,
            1.2,
        ))
        .blast(&blast::DRAGON),
    KindSpec::aerial(K::Twinkler, "twinkler", "Twinkler", STD).blast(&blast::TWINKLER),
    KindSpec::aerial(K::Palm, "palm", "Palm", STD).blast(&blast::PALM),
    KindSpec::aerial(K::MegaShot, "mega_shot", "Mega Shot", HEAVY)
        .trail(Trail::new(
            0.9,
            Tint::Solid(Shade::Band {
                from: 350.0,
                spread: 20.0,
                s: 70.0,
                l: 50.0,
            }),
            30,
            1.5,
        ))
        .loud()
        .blast(&blast::MEGA),
    KindSpec::placed(K::Anar, "anar", "Anar", Ground, Stationary)
        .cue(FIZZ)
        .fuse(80, 120)
        .blast(&blast::GENERIC),
    KindSpec::placed(K::FlowerPot, "flower_pot", "Flower Pot", Ground, Stationary)
        .cue(FIZZ)
        .fuse(180, 180),
    KindSpec::placed(K::Chakri, "chakri", "Chakri", Ground, Stationary)
        .cue(FIZZ)
        .fuse(100, 150),
    KindSpec::placed(
        K::FountainShot,
        "fountain_shot",
        "Fountain Shot",
        Ground,
        MultiShot,
    )
    .not_ground()
    .cue(SoundCue::launch(STD))
    .fuse(250, 250),
    KindSpec::placed(K::SmokeBomb, "smoke_bomb", "Smoke Bomb", Ground, Stationary)
        .cue(FIZZ)
        .fuse(300, 400),
    KindSpec::placed(K::Arc, "arc", "Arc", Ground, MultiShot)
        .not_ground()
        .cue(SoundCue::launch(STD))
        .fuse(200, 200),
    KindSpec::placed(K::Sutli, "sutli", "Sutli Bomb", Bombs, Stationary)
        .cue(PRIMED)
        .loud()
        .fuse(60, 60)
        .blast(&blast::SUTLI),
    KindSpec::placed(K::Garland, "garland", "Garland", Bombs, Stationary)
        .cue(SoundCue::explosion(ExplosionKind::Pop, 0.05))
        .fuse(150, 150),
    KindSpec::placed(
        K::DoubleBomb,
        "double_bomb",
        "Double Bomb",
        Bombs,
        Stationary,
    )
    .cue(PRIMED)
    .loud()
    .fuse(60, 60)
    .blast(&blast::DOUBLE_BOMB),
    KindSpec::placed(
        K::PetrolBomb,
        "petrol_bomb",
        "Petrol Bomb",
        Bombs,
        Stationary,
    )
    .cue(PRIMED)
    .loud()
    .fuse(80, 80)
    .blast(&blast::PETROL),
    KindSpec::placed(K::Ladi, "ladi", "Ladi", Bombs, Stationary).fuse(120, 120),
    KindSpec::placed(K::C4, "c4", "C4", Bombs, Stationary)
        .cue(PRIMED)
        .loud()
        .fuse(120, 120)
        .blast(&blast::C4),
    KindSpec::placed(K::FlashBang, "flash_bang", "Flash Bang", Bombs, Stationary)
        .cue(PRIMED)
        .loud()
        .fuse(50, 50)
        .blast(&blast::FLASH),
    KindSpec::placed(
        K::SmokeGrenade,
        "smoke_grenade",
        "Smoke Grenade",
        Bombs,
        Stationary,
    )
    .not_ground()
    .cue(PRIMED)
    .fuse(80, 80)
    .blast(&blast::SMOKE_GRENADE),
    KindSpec::placed(K::Molotov, "molotov", "Molotov", Bombs, Stationary)
        .cue(PRIMED)
        .fuse(80, 80)
        .blast(&blast::PETROL),
    KindSpec::aerial(K::Double, "double", "Double", STD)
        .trail(Trail::new(
            0.5,
            Tint::Solid(Shade::Band {
                from: 300.0,
                spread: 40.0,
                s: 100.0,
                l: 60.0,
            }),
            15,
            1.0,
        ))
        .internal()
        .blast(&blast::DOUBLE),
    KindSpec::aerial(K::SparkBomb, "spark_bomb", "Spark Bomb", STD)
        .internal()
        .blast(&blast::GENERIC),
    KindSpec::aerial(K::MoonShot, "moon_shot", "Moon Shot", STD)
        .internal()
        .blast(&blast::MOON),
    KindSpec::placed(
        K::DoubleBombStage2,
        "double_bomb_2",
        "Double Bomb (second stage)",
        Bombs,
        Stationary,
    )
    .internal()
    .not_ground()
    .silent()
    .fuse(15, 15)
    .blast(&blast::DOUBLE_BOMB_STAGE2),
];

impl FireworkKind {
    pub const ALL: [FireworkKind; 30] = [
        K::Rocket,
        K::FlowerShot,
        K::IndianSkyshot,
        K::JapaneseSkyshot,
        K::CrossSkyShot,
        K::Cyclone,
        K::Skyshot,
        K::Dragon,
        K::Twinkler,
        K::Palm,
        K::MegaShot,
        K::Anar,
        K::FlowerPot,
        K::Chakri,
        K::FountainShot,
        K::SmokeBomb,
        K::Arc,
        K::Sutli,
        K::Garland,
        K::DoubleBomb,
        K::PetrolBomb,
        K::Ladi,
        K::C4,
        K::FlashBang,
        K::SmokeGrenade,
        K::Molotov,
        K::Double,
        K::SparkBomb,
        K::MoonShot,
        K::DoubleBombStage2,
    ];

    pub fn spec(self) -> &'static KindSpec {
        &CATALOG[self as usize]
    }

    pub fn id(self) -> &'static str {
        self.spec().id
    }

    pub fn family(self) -> Family {
        self.spec().family
    }

    pub fn category(self) -> Category {
        self.spec().category
    }

    pub fn is_public(self) -> bool {
        self.category() != Category::Internal
    }

    pub fn is_ascending(self) -> bool {
        self.family() == Family::Ascending
    }

    pub fn launch_cue(self) -> Option<SoundCue> {
        self.spec().launch
    }

    /// Kinds a user, the watcher, or the finale may spawn.
    pub fn public() -> impl Iterator<Item = FireworkKind> {
        Self::ALL.into_iter().filter(|k| k.is_public())
    }

    /// Public kinds that fly.
    pub fn aerials() -> impl Iterator<Item = FireworkKind> {
        Self::public().filter(|k| k.is_ascending())
    }
}

impl fmt::Display for FireworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FireworkKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.id() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_follows_declaration_order() {
        for (i, kind) in FireworkKind::ALL.iter().enumerate() {
            assert_eq!(CATALOG[i].kind, *kind, "entry {i}");
            assert_eq!(*kind as usize, i);
        }
    }

    #[test]
    fn ids_round_trip_through_from_str_and_serde() {
        for kind in FireworkKind::ALL {
            assert_eq!(kind.id().parse::<FireworkKind>(), Ok(kind));
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.id()));
        }
    }

    #[test]
    fn unknown_ids_are_rejected() {
        assert_eq!(
            "roman_candle".parse::<FireworkKind>(),
            Err(UnknownKind("roman_candle".into()))
        );
    }

    #[test]
    fn public_catalog_has_all_groups() {
        let count = |c| FireworkKind::public().filter(|k| k.category() == c).count();
        assert_eq!(count(Category::Aerial), 11);
        assert_eq!(count(Category::Ground), 6);
        assert_eq!(count(Category::Bombs), 9);
        assert!(FireworkKind::aerials().all(|k| k.is_ascending()));
    }

    #[test]
    fn multi_shot_and_ascending_families() {
        assert_eq!(FireworkKind::Arc.family(), Family::MultiShot);
        assert_eq!(FireworkKind::FountainShot.family(), Family::MultiShot);
        assert!(FireworkKind::SparkBomb.is_ascending());
        assert!(FireworkKind::MoonShot.is_ascending());
        assert_eq!(FireworkKind::DoubleBombStage2.family(), Family::Stationary);
    }

    #[test]
    fn every_ascending_kind_leaves_a_trail() {
        for kind in FireworkKind::ALL.into_iter().filter(|k| k.is_ascending()) {
            assert!(kind.spec().trail.is_some(), "{kind}");
            assert!(kind.spec().blast.is_some(), "{kind}");
        }
    }

    #[test]
    fn sensing_flags() {
        assert!(FireworkKind::Anar.spec().ground);
        assert!(FireworkKind::Molotov.spec().ground);
        assert!(!FireworkKind::Arc.spec().ground);
        assert!(FireworkKind::MegaShot.spec().loud);
        assert!(FireworkKind::C4.spec().loud);
        assert!(!FireworkKind::Rocket.spec().loud);
    }
}
