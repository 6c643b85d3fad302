use std::sync::OnceLock;

use super::Address;
use crate::{
    FieldValue, Form, FormError, MaskValidator, MaxLengthValidator, MinLengthValidator,
    RequireValidator, Schema, Validators,
};

/// Input form for a new address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressForm {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Street and house number.
    pub street: String,
    /// ZIP code.
    pub zip_code: String,
    /// City.
    pub city: String,
    /// Country key.
    pub country: String,
    /// Gender radio choice.
    pub gender: String,
    /// Public checkbox.
    pub public: bool,
}

impl AddressForm {
    /// The submitted data as an address without identifier.
    pub fn to_address(&self) -> Address {
        Address {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            street: self.street.clone(),
            zip_code: self.zip_code.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            gender: self.gender.clone(),
            public: self.public,
            ..Address::default()
        }
    }

    fn load(&mut self, address: &Address) {
        self.first_name = address.first_name.clone();
        self.last_name = address.last_name.clone();
        self.street = address.street.clone();
        self.zip_code = address.zip_code.clone();
        self.city = address.city.clone();
        self.country = address.country.clone();
        self.gender = address.gender.clone();
        self.public = address.public;
    }
}

impl Form for AddressForm {
    type Init = ();

    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<AddressForm>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<Self>::new("AddressForm")
                .text("firstName", |f| &f.first_name, |f| &mut f.first_name)
                .text("lastName", |f| &f.last_name, |f| &mut f.last_name)
                .text("street", |f| &f.street, |f| &mut f.street)
                .text("zipCode", |f| &f.zip_code, |f| &mut f.zip_code)
                .text("city", |f| &f.city, |f| &mut f.city)
                .text("country", |f| &f.country, |f| &mut f.country)
                .text("gender", |f| &f.gender, |f| &mut f.gender)
                .flag("public", |f| &f.public, |f| &mut f.public)
        })
    }

    fn validators() -> Result<Validators, FormError> {
        Ok(Validators::new()
            .with(RequireValidator::new([
                "firstName",
                "lastName",
                "street",
                "zipCode",
                "city",
                "country",
            ]))
            .with(MinLengthValidator::new(2, ["firstName", "lastName"]))
            .with(MaxLengthValidator::new(15, ["firstName", "lastName"]))
            .with(MaskValidator::parse("/^[0-9]{5}$/", ["zipCode"])?))
    }

    fn init(&mut self, _args: ()) -> Result<(), FormError> {
        self.gender = "male".to_string();
        Ok(())
    }
}

/// Edit form for a stored address: the address fields plus its identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeAddressForm {
    /// Identifier of the edited address; `None` if missing or not a number.
    pub id: Option<u64>,
    /// The address fields.
    pub address: AddressForm,
}

impl Form for ChangeAddressForm {
    type Init = Address;

    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<ChangeAddressForm>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<Self>::new("ChangeAddressForm")
                .extend(AddressForm::schema(), |f| &f.address, |f| &mut f.address)
                .accessor(
                    "id",
                    |f| FieldValue::from(f.id.map(|id| id.to_string())),
                    |f, value| f.id = value.as_text().trim().parse().ok(),
                )
        })
    }

    fn validators() -> Result<Validators, FormError> {
        Ok(AddressForm::validators()?.with(RequireValidator::new(["id"])))
    }

    fn init(&mut self, address: Address) -> Result<(), FormError> {
        self.id = address.id();
        self.address.load(&address);
        Ok(())
    }
}
