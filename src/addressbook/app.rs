use std::sync::Arc;

use super::pages::{add_page, edit_page, list_page};
use super::{AddressBook, AddressForm, ChangeAddressForm};
use crate::script::client_script_response;
use crate::{Catalog, FormError, Request, RequestContext, Response, Validation};

const PAGE_TYPES: &[&str] = &["text/html"];

/// The address book application of one session.
///
/// Routes, relative to the application root:
///
/// | path              | handler                                   |
/// |-------------------|-------------------------------------------|
/// | `/`, `/index`     | address list                              |
/// | `/add`            | form for a new address                    |
/// | `/address?id=N`   | form for changing address `N`             |
/// | `/actions/add`    | store a new address, redirect to the list |
/// | `/actions/change` | store changes, redirect to the list       |
/// | `/actions/delete` | delete address `id`, redirect to the list |
/// | `/formkit.js`     | client-side validation runtime            |
#[derive(Debug)]
pub struct AddressBookApp {
    book: AddressBook,
    catalog: Arc<Catalog>,
    mount: String,
}

impl AddressBookApp {
    /// An empty address book served below `mount` (e.g. `/book`, or `""` for
    /// the server root).
    pub fn new(catalog: Arc<Catalog>, mount: impl Into<String>) -> Self {
        Self {
            book: AddressBook::new(),
            catalog,
            mount: mount.into(),
        }
    }

    /// The stored addresses.
    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    /// Handle one request.
    pub fn handle(&mut self, request: Request) -> Response {
        let span = tracing::debug_span!("request", method = request.method(), path = request.path());
        let _guard = span.enter();

        let route = request
            .path()
            .strip_prefix(self.mount.as_str())
            .unwrap_or(request.path())
            .trim_end_matches('/')
            .to_string();
        let mut ctx = RequestContext::new(request, Arc::clone(&self.catalog));

        let result = match route.as_str() {
            "" | "/index" => self.page(&mut ctx, |ctx, book| list_page(ctx, book)),
            "/add" => self.page(&mut ctx, |ctx, _| add_page(ctx)),
            "/address" => self.page(&mut ctx, edit_page),
            "/actions/add" => self.add_address(&mut ctx),
            "/actions/change" => self.change_address(&mut ctx),
            "/actions/delete" => self.delete_address(&mut ctx),
            "/formkit.js" => Ok(client_script_response()),
            _ => {
                tracing::debug!(route = %route, "no such page");
                Ok(Response::text(404, format!("Not found: {route}")))
            }
        };

        result.unwrap_or_else(|err| match err {
            FormError::UnknownRecord { .. } => Response::text(404, err.to_string()),
            err => {
                tracing::error!(error = %err, "request failed");
                Response::text(500, "Internal server error")
            }
        })
    }

    fn page<P>(&self, ctx: &mut RequestContext, page: P) -> Result<Response, FormError>
    where
        P: FnOnce(&mut RequestContext, &AddressBook) -> Result<Response, FormError>,
    {
        if let Err(err) = ctx.request().require_media_type(PAGE_TYPES) {
            return Ok(Response::not_acceptable(&err));
        }
        page(ctx, &self.book)
    }

    fn redirect_to_list(ctx: &RequestContext) -> Response {
        Response::redirect(ctx.request().build_url("index"))
    }

    fn add_address(&mut self, ctx: &mut RequestContext) -> Result<Response, FormError> {
        match ctx.parse_or_redisplay::<AddressForm, _>(add_page)? {
            Validation::Success(form) => {
                self.book.add(form.to_address())?;
                Ok(Self::redirect_to_list(ctx))
            }
            Validation::Failure(page) => Ok(page),
        }
    }

    fn change_address(&mut self, ctx: &mut RequestContext) -> Result<Response, FormError> {
        let book = &self.book;
        let parsed = ctx.parse_or_redisplay::<ChangeAddressForm, _>(|ctx| edit_page(ctx, book))?;
        match parsed {
            Validation::Success(ChangeAddressForm {
                id: Some(id),
                address,
            }) => {
                self.book.set(id, address.to_address())?;
                Ok(Self::redirect_to_list(ctx))
            }
            // The id is required, so a successful parse always carries one.
            Validation::Success(_) => Ok(Response::text(400, "Missing address ID")),
            Validation::Failure(page) => Ok(page),
        }
    }

    fn delete_address(&mut self, ctx: &mut RequestContext) -> Result<Response, FormError> {
        let id = ctx.request().param_or("id", "");
        match id.trim().parse::<u64>() {
            Ok(id) => {
                self.book.delete(id)?;
                Ok(Self::redirect_to_list(ctx))
            }
            Err(_) => Ok(Response::text(404, format!("No address with ID {id} found"))),
        }
    }
}
