pub mod config;
pub mod error;
pub mod kb;
pub mod normalize;
pub mod persist;
pub mod providers;
pub mod recommender;
pub mod render;
pub mod schema;
pub mod session;

pub use config::AppConfig;
pub use error::PairingError;
pub use kb::{lookup_pairings, KbRecord, KnowledgeBase};
pub use normalize::{fix_output, ModelOutput};
pub use persist::{save_to_txt, PairingLog};
pub use recommender::{Origin, Recommendation, Recommender};
pub use render::{render_report, RenderOptions};
pub use schema::{validate, validate_with_repair, PairingResponse, Repairer};
pub use session::ChatHistory;
