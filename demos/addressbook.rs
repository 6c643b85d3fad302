//! Walks the address book through one session: a rejected submission, two
//! stored addresses, a change and a deletion.
//!
//! Run with: cargo run --example addressbook

use std::sync::Arc;

use formkit::addressbook::AddressBookApp;
use formkit::{FormError, Request, Response, Settings};

fn main() -> Result<(), FormError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let settings = Settings::new()
        .base_url("..")
        .locales(["en", "de"])
        .default_locale("en")
        .message("formkit.validation.mask", "Please enter a five digit zip code");
    let mut app = AddressBookApp::new(Arc::new(settings.catalog()?), "/book");

    let post = |path: &str, body: &str| {
        settings
            .configure(Request::builder("POST", format!("/book{path}")))
            .form_body(body)
            .build()
    };
    let get = |path: &str| {
        settings
            .configure(Request::builder("GET", format!("/book{path}")))
            .build()
    };

    let address = "lastName=Smith&street=Main+Street+1&city=Springfield&country=uk&gender=female";

    show("rejected", &app.handle(post("/actions/add", &format!("firstName=A&zipCode=123&{address}"))));
    show("added", &app.handle(post("/actions/add", &format!("firstName=Anna&zipCode=12345&{address}"))));
    show("added", &app.handle(post("/actions/add", &format!("firstName=Bert&zipCode=54321&{address}"))));
    show(
        "changed",
        &app.handle(post("/actions/change", &format!("id=2&firstName=Berta&zipCode=54321&{address}"))),
    );
    show("deleted", &app.handle(get("/actions/delete?id=1")));
    show("listing", &app.handle(get("/index")));

    for address in app.book().all() {
        tracing::info!(id = ?address.id(), first_name = %address.first_name, "stored");
    }
    Ok(())
}

fn show(step: &str, response: &Response) {
    match response.location() {
        Some(location) => println!("{step}: {} -> {location}", response.status()),
        None => println!("{step}: {}\n{}", response.status(), response.body()),
    }
}
