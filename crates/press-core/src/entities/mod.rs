//! Entity structs for all Pressroom domain objects.

mod article;
mod draft;
mod idea;
mod trend;

pub use article::PublishedArticle;
pub use draft::Draft;
pub use idea::{GeneratedIdea, Idea};
pub use trend::TrendItem;
