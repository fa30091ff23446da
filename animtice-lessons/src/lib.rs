//! `animtice-lessons` holds the concrete grade-3 lessons built on the `animtice` engine, and the
//! catalog the CLI looks them up in.
//!
//! Every lesson follows the same arc: intro, exploration, discussion, institutionalization,
//! assessment, outro. Optional steps are switched by the lesson's style toggles; content
//! (examples, prompts, stated answers) comes from its config record and is validated before
//! anything is drawn.

#![forbid(unsafe_code)]

mod common;

pub mod adding;
pub mod change;
pub mod equivalent;
pub mod fractions;
pub mod lines;
pub mod meter;
pub mod modeling;
pub mod part_value;
pub mod perimeter;
pub mod place_value;
pub mod segmentation;
pub mod shapes;
pub mod sharing;
pub mod whole_from_parts;

pub use adding::{AddingConfig, AddingLesson, AddingStyle, FractionSum};
pub use change::{ChangeConfig, ChangeKind, ChangeLesson, ChangeProblem, ChangeStyle, Situation};
pub use equivalent::{EquivalentConfig, EquivalentLesson, EquivalentStyle};
pub use fractions::{Fraction, FractionsConfig, FractionsLesson, FractionsStyle};
pub use lines::{LinesConfig, LinesLesson, LinesStyle, Relation};
pub use meter::{MeasuredObject, MeterConfig, MeterLesson, MeterStyle};
pub use modeling::{ModelKind, ModelProblem, ModelingConfig, ModelingLesson, ModelingStyle};
pub use part_value::{PartValueConfig, PartValueLesson, PartValueProblem, PartValueStyle};
pub use perimeter::{PerimeterConfig, PerimeterLesson, PerimeterStyle, ShapeSpec};
pub use place_value::{Digits, PlaceValueConfig, PlaceValueLesson, PlaceValueStyle};
pub use segmentation::{
    SegmentationConfig, SegmentationLesson, SegmentationOption, SegmentationProblem,
    SegmentationStyle,
};
pub use shapes::{Figure, ShapesConfig, ShapesLesson, ShapesStyle};
pub use sharing::{SharingConfig, SharingExample, SharingLesson, SharingStyle};
pub use whole_from_parts::{EqualPartsProblem, WholeConfig, WholeLesson, WholeStyle};

use animtice::{Bilingual, Lesson, LessonContent, LessonInputs, TiceResult, Timeline};

/// One catalog row: a lesson's id, its default title and how to build its timeline.
#[derive(Clone, Copy)]
pub struct LessonEntry {
    pub id: &'static str,
    pub title: fn() -> Bilingual,
    pub build: fn(&LessonInputs) -> TiceResult<Timeline>,
}

impl std::fmt::Debug for LessonEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LessonEntry").field("id", &self.id).finish()
    }
}

fn entry<L: Lesson>() -> LessonEntry {
    LessonEntry {
        id: L::ID,
        title: || L::Config::default().header().title.clone(),
        build: animtice::build_timeline::<L>,
    }
}

/// All lessons, in curriculum order.
pub fn catalog() -> Vec<LessonEntry> {
    vec![
        entry::<PlaceValueLesson>(),
        entry::<FractionsLesson>(),
        entry::<EquivalentLesson>(),
        entry::<AddingLesson>(),
        entry::<MeterLesson>(),
        entry::<PerimeterLesson>(),
        entry::<SharingLesson>(),
        entry::<ModelingLesson>(),
        entry::<WholeLesson>(),
        entry::<PartValueLesson>(),
        entry::<ChangeLesson>(),
        entry::<SegmentationLesson>(),
        entry::<LinesLesson>(),
        entry::<ShapesLesson>(),
    ]
}

pub fn find(id: &str) -> Option<LessonEntry> {
    catalog().into_iter().find(|e| e.id == id)
}
