//! Popup controller, element factory and field harvester.
//!
//! The controller owns a single overlay whose content is replaced per
//! request by one of three form-builders. Submit buttons created through
//! [`factory`] close the overlay, [`harvest`](harvest::harvest) the rendered
//! controls into a [`FieldRecord`] and hand it to the caller's callback.

pub mod builders;
mod controller;
pub mod factory;
mod guard;
pub mod harvest;
mod layout;
pub mod markers;
mod state;
mod surface;

pub use builders::{FormBuilder, FormBuilders, FormOptions, FormRequest};
pub use controller::PopupController;
pub use guard::PointerGuard;
pub use harvest::{FieldRecord, harvest};
pub use layout::PopupLayout;
pub use state::{FormType, PopupState};
pub use surface::{ButtonAction, FormSurface, SubmitCallback};
