use super::ConstructionState;
use serde::Serialize;

/// Finish a part shows once its task is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Finish {
    #[default]
    Concrete,
    Block,
    Plaster,
    Paint,
    Glass,
    Ground,
    Mep,
    Steel,
    Water,
    Paving,
}

impl Finish {
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "concrete" => Some(Self::Concrete),
            "block" => Some(Self::Block),
            "plaster" => Some(Self::Plaster),
            "paint" => Some(Self::Paint),
            "glass" => Some(Self::Glass),
            "ground" => Some(Self::Ground),
            "mep" => Some(Self::Mep),
            "steel" => Some(Self::Steel),
            "water" => Some(Self::Water),
            "paving" => Some(Self::Paving),
            _ => None,
        }
    }

    /// Resolves a catalog finish key, falling back to concrete when the key is
    /// unset or not in the table.
    #[must_use]
    pub fn resolve(key: Option<&str>) -> Self {
        key.and_then(Self::from_key).unwrap_or_default()
    }

    #[must_use]
    pub const fn material(self) -> Material {
        match self {
            Self::Concrete => Material::solid(0x0095_a5a6),
            Self::Block => Material::solid(0x00c0_392b),
            Self::Plaster => Material::solid(0x00ec_f0f1),
            Self::Paint => Material::solid(0x00ff_ffff),
            Self::Glass => Material::translucent(0x0034_98db, 0.6),
            Self::Ground => Material::solid(0x008d_6e63),
            Self::Mep => Material::solid(0x0029_80b9),
            Self::Steel => Material::solid(0x0044_4444),
            Self::Water => Material::translucent(0x0000_aaff, 0.6),
            Self::Paving => Material::solid(0x00a1_887f),
        }
    }
}

/// Flat render description the viewport paints with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// 0xRRGGBB
    pub color: u32,
    pub opacity: f32,
    pub wireframe: bool,
}

impl Material {
    const fn solid(color: u32) -> Self {
        Self {
            color,
            opacity: 1.0,
            wireframe: false,
        }
    }

    const fn translucent(color: u32, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            wireframe: false,
        }
    }

    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.color >> 16) & 0xff) as u8,
            ((self.color >> 8) & 0xff) as u8,
            (self.color & 0xff) as u8,
        )
    }
}

const GHOST_MATERIAL: Material = Material {
    color: 0x0088_8888,
    opacity: 0.1,
    wireframe: true,
};

const ACTIVE_COLOR: u32 = 0x00f3_9c12;

const HIGHLIGHT_MATERIAL: Material = Material {
    color: 0x00ff_ff00,
    opacity: 1.0,
    wireframe: false,
};

/// What an element currently looks like.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Appearance {
    Ghost,
    Active { opacity: f32 },
    Done { finish: Finish },
    Highlight,
}

impl Appearance {
    /// Appearance the simulation assigns for a state.
    #[must_use]
    pub fn for_state(state: ConstructionState, finish: Finish) -> Self {
        match state {
            ConstructionState::Ghost => Self::Ghost,
            ConstructionState::Active { progress } => Self::Active {
                opacity: (0.3 + 0.7 * progress) as f32,
            },
            ConstructionState::Done => Self::Done { finish },
        }
    }

    #[must_use]
    pub fn material(self) -> Material {
        match self {
            Self::Ghost => GHOST_MATERIAL,
            Self::Active { opacity } => Material::translucent(ACTIVE_COLOR, opacity),
            Self::Done { finish } => finish.material(),
            Self::Highlight => HIGHLIGHT_MATERIAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_or_missing_finish_defaults_to_concrete() {
        assert_eq!(Finish::resolve(Some("tile")), Finish::Concrete);
        assert_eq!(Finish::resolve(None), Finish::Concrete);
        assert_eq!(Finish::resolve(Some("steel")), Finish::Steel);
    }

    #[test]
    fn active_opacity_scales_from_point_three_to_one() {
        let at = |progress| Appearance::for_state(ConstructionState::Active { progress }, Finish::Block);
        assert_eq!(at(0.0), Appearance::Active { opacity: 0.3 });
        assert_eq!(at(1.0), Appearance::Active { opacity: 1.0 });
        match at(0.5) {
            Appearance::Active { opacity } => assert!((opacity - 0.65).abs() < 1e-6),
            other => panic!("expected active, got {other:?}"),
        }
    }

    #[test]
    fn ghost_ignores_finish() {
        assert_eq!(
            Appearance::for_state(ConstructionState::Ghost, Finish::Water).material(),
            Appearance::Ghost.material()
        );
        assert!(Appearance::Ghost.material().wireframe);
    }

    #[test]
    fn done_uses_finish_material() {
        let done = Appearance::for_state(ConstructionState::Done, Finish::Block);
        assert_eq!(done, Appearance::Done { finish: Finish::Block });
        assert_eq!(done.material().rgb(), (0xc0, 0x39, 0x2b));
    }

    #[test]
    fn highlight_is_fully_opaque() {
        assert_eq!(Appearance::Highlight.material().opacity, 1.0);
    }
}
