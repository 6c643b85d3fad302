//! A small address book built on the form toolkit
//!
//! Shows the full request cycle: a page renders a form through [`Html`](crate::Html),
//! an action parses it with [`RequestContext::parse_or_redisplay`](crate::RequestContext::parse_or_redisplay),
//! and either stores the address and redirects to the listing or answers with
//! the input page, errors attached.
//!
//! ```
//! use std::sync::Arc;
//! use formkit::addressbook::AddressBookApp;
//! use formkit::{Catalog, Request};
//!
//! let mut app = AddressBookApp::new(Arc::new(Catalog::new()), "");
//! let response = app.handle(
//!     Request::builder("POST", "/actions/add")
//!         .form_body("firstName=Al&lastName=Smith&street=Main&zipCode=12345&city=X&country=germany")
//!         .base_url("..")
//!         .build(),
//! );
//! assert_eq!(response.location(), Some("../index"));
//! assert_eq!(app.book().len(), 1);
//! ```

mod address;
mod app;
mod forms;
mod pages;
mod store;

pub use address::Address;
pub use app::AddressBookApp;
pub use forms::{AddressForm, ChangeAddressForm};
pub use pages::{add_page, edit_page, list_page};
pub use store::AddressBook;
