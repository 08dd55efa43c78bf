mod credential;
mod findings;
mod posture;
mod status;

pub use credential::*;
pub use findings::*;
pub use posture::*;
pub use status::*;
