//! The complaint entity, its identifiers, timestamps and intake checks.

pub mod clock;
pub mod id;
pub mod intake;
pub mod model;

pub use clock::{Clock, ManualClock, SystemClock};
pub use intake::{encode_photo, validate, FieldErrors};
pub use model::{Complaint, ComplaintCategory, ComplaintStatus, NewComplaint};
