//! Business logic services for the Coffee Tasting API

pub mod coffee;
pub mod flavor_tag;
pub mod recommendation;
pub mod roaster;
pub mod tasting;

pub use coffee::CoffeeService;
pub use flavor_tag::FlavorTagService;
pub use recommendation::RecommendationService;
pub use roaster::RoasterService;
pub use tasting::TastingService;
