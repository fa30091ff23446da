use kurbo::{Point, Vec2};

use crate::{
    animation::ease::Ease,
    scene::visual::{ObjectId, Visual},
};

/// One or more objects an animation applies to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Targets(pub Vec<ObjectId>);

impl From<ObjectId> for Targets {
    fn from(id: ObjectId) -> Self {
        Self(vec![id])
    }
}

impl From<Vec<ObjectId>> for Targets {
    fn from(ids: Vec<ObjectId>) -> Self {
        Self(ids)
    }
}

impl From<&[ObjectId]> for Targets {
    fn from(ids: &[ObjectId]) -> Self {
        Self(ids.to_vec())
    }
}

impl From<&Vec<ObjectId>> for Targets {
    fn from(ids: &Vec<ObjectId>) -> Self {
        Self(ids.clone())
    }
}

impl<const N: usize> From<[ObjectId; N]> for Targets {
    fn from(ids: [ObjectId; N]) -> Self {
        Self(ids.to_vec())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AnimationKind {
    /// Progressively draw the outline.
    Create,
    /// Reveal text character by character (paths are drawn like `Create`).
    Write,
    FadeIn { shift: Vec2 },
    /// Fade to transparent; the object is gone afterwards.
    FadeOut { shift: Vec2 },
    /// Become `target`. Applied to a single object.
    Transform { target: Box<Visual> },
    /// Travel through `points` (absolute scene positions of the object's center).
    MoveAlong { points: Vec<Point> },
    Shift { by: Vec2 },
    /// Pulse up to `scale` and back.
    Indicate { scale: f64 },
}

/// A declarative animation over some objects, played by [`Stage::play`](crate::Stage::play).
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub targets: Targets,
    pub kind: AnimationKind,
    pub ease: Option<Ease>,
}

impl Animation {
    fn new(targets: impl Into<Targets>, kind: AnimationKind) -> Self {
        Self {
            targets: targets.into(),
            kind,
            ease: None,
        }
    }

    pub fn create(targets: impl Into<Targets>) -> Self {
        Self::new(targets, AnimationKind::Create)
    }

    pub fn write(targets: impl Into<Targets>) -> Self {
        Self::new(targets, AnimationKind::Write)
    }

    pub fn fade_in(targets: impl Into<Targets>) -> Self {
        Self::new(targets, AnimationKind::FadeIn { shift: Vec2::ZERO })
    }

    pub fn fade_in_shifted(targets: impl Into<Targets>, shift: Vec2) -> Self {
        Self::new(targets, AnimationKind::FadeIn { shift })
    }

    pub fn fade_out(targets: impl Into<Targets>) -> Self {
        Self::new(targets, AnimationKind::FadeOut { shift: Vec2::ZERO })
    }

    pub fn fade_out_shifted(targets: impl Into<Targets>, shift: Vec2) -> Self {
        Self::new(targets, AnimationKind::FadeOut { shift })
    }

    pub fn transform(id: ObjectId, target: Visual) -> Self {
        Self::new(
            id,
            AnimationKind::Transform {
                target: Box::new(target),
            },
        )
    }

    pub fn move_along(id: ObjectId, points: Vec<Point>) -> Self {
        Self::new(id, AnimationKind::MoveAlong { points }).eased(Ease::Linear)
    }

    pub fn shift(targets: impl Into<Targets>, by: Vec2) -> Self {
        Self::new(targets, AnimationKind::Shift { by })
    }

    pub fn indicate(targets: impl Into<Targets>) -> Self {
        Self::new(targets, AnimationKind::Indicate { scale: 1.2 })
    }

    pub fn eased(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn ease_or_default(&self) -> Ease {
        self.ease.unwrap_or_default()
    }

    /// Animations that bring a staged object onto the screen.
    pub fn introduces(&self) -> bool {
        matches!(
            self.kind,
            AnimationKind::Create | AnimationKind::Write | AnimationKind::FadeIn { .. }
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/action.rs"]
mod tests;
