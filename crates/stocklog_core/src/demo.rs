//! Built-in demonstration dataset.
//!
//! Served when the data source cannot deliver the core reference lists, and
//! used to seed fresh databases from the CLI.

use crate::model::reference::{Category, NameList, Product};
use crate::model::registration::Registration;
use crate::repo::reference_repo::ReferenceRepository;
use crate::repo::registration_repo::RegistrationRepository;
use crate::repo::RepoResult;
use crate::state::ReferenceData;
use log::info;

const USERS: [&str; 6] = [
    "Tom Peckstadt",
    "Sven De Poorter",
    "Nele Herteleer",
    "Wim Peckstadt",
    "Siegfried Weverbergh",
    "Jan Janssen",
];

const LOCATIONS: [&str; 5] = [
    "Warehouse Dematic groot boven",
    "Warehouse Interflon",
    "Warehouse Dematic klein beneden",
    "Onderhoud werkplaats",
    "Kantoor 1.1",
];

const PURPOSES: [&str; 5] = [
    "Presentatie",
    "Thuiswerken",
    "Reparatie",
    "Training",
    "Demonstratie",
];

const CATEGORIES: [(&str, &str); 3] = [
    ("1", "Smeermiddelen"),
    ("2", "Reinigers"),
    ("3", "Onderhoud"),
];

// (id, name, qr_code, category_id)
const PRODUCTS: [(&str, &str, &str, &str); 6] = [
    ("1", "Interflon Metal Clean spray 500ml", "IFLS001", "1"),
    ("2", "Interflon Grease LT2 Lube shuttle 400gr", "IFFL002", "1"),
    ("3", "Interflon Maintenance Kit", "IFD003", "2"),
    ("4", "Interflon Food Lube spray 500ml", "IFGR004", "1"),
    ("5", "Interflon Foam Cleaner spray 500ml", "IFMC005", "2"),
    ("6", "Interflon Fin Super", "IFMK006", "3"),
];

// (id, user, product index, location, purpose, timestamp)
#[rustfmt::skip]
const REGISTRATIONS: [(&str, &str, usize, &str, &str, &str); 13] = [
    ("1", "Tom Peckstadt", 0, "Warehouse Interflon", "Reparatie", "2025-06-15T05:41:00Z"),
    ("2", "Nele Herteleer", 0, "Warehouse Dematic klein beneden", "Training", "2025-06-15T05:48:00Z"),
    ("3", "Tom Peckstadt", 1, "Warehouse Dematic groot boven", "Reparatie", "2025-06-15T12:53:00Z"),
    ("4", "Tom Peckstadt", 1, "Warehouse Dematic groot boven", "Demonstratie", "2025-06-16T20:32:00Z"),
    ("5", "Sven De Poorter", 0, "Warehouse Dematic groot boven", "Presentatie", "2025-06-16T21:07:00Z"),
    ("6", "Tom Peckstadt", 2, "Onderhoud werkplaats", "Reparatie", "2025-06-14T10:15:00Z"),
    ("7", "Siegfried Weverbergh", 3, "Warehouse Interflon", "Training", "2025-06-14T14:22:00Z"),
    ("8", "Wim Peckstadt", 4, "Warehouse Dematic klein beneden", "Demonstratie", "2025-06-13T09:30:00Z"),
    ("9", "Sven De Poorter", 2, "Onderhoud werkplaats", "Reparatie", "2025-06-13T16:45:00Z"),
    ("10", "Tom Peckstadt", 0, "Warehouse Dematic groot boven", "Presentatie", "2025-06-12T11:20:00Z"),
    ("11", "Siegfried Weverbergh", 1, "Warehouse Interflon", "Training", "2025-06-12T15:10:00Z"),
    ("12", "Siegfried Weverbergh", 3, "Warehouse Dematic klein beneden", "Demonstratie", "2025-06-11T08:55:00Z"),
    ("13", "Tom Peckstadt", 1, "Warehouse Dematic groot boven", "Reparatie", "2025-06-10T13:40:00Z"),
];

/// Reference lists of the demonstration dataset.
pub fn demo_reference() -> ReferenceData {
    ReferenceData {
        users: USERS.iter().map(|name| name.to_string()).collect(),
        products: PRODUCTS
            .iter()
            .map(|(id, name, qr_code, category_id)| {
                let mut product = Product::with_id(*id, *name);
                product.qr_code = Some(qr_code.to_string());
                product.category_id = Some(category_id.to_string());
                product
            })
            .collect(),
        categories: CATEGORIES
            .iter()
            .map(|(id, name)| Category::with_id(*id, *name))
            .collect(),
        locations: LOCATIONS.iter().map(|name| name.to_string()).collect(),
        purposes: PURPOSES.iter().map(|name| name.to_string()).collect(),
    }
}

/// The thirteen demonstration registrations, in dataset order.
///
/// `time` is stored as `HH:MM`, the way the earliest rows were recorded.
pub fn demo_registrations() -> Vec<Registration> {
    REGISTRATIONS
        .iter()
        .map(|(id, user, product_index, location, purpose, timestamp)| {
            let (_, product, qr_code, _) = PRODUCTS[*product_index];
            Registration {
                id: id.to_string(),
                user: user.to_string(),
                product: product.to_string(),
                location: location.to_string(),
                purpose: purpose.to_string(),
                timestamp: timestamp.to_string(),
                date: timestamp[..10].to_string(),
                time: timestamp[11..16].to_string(),
                qr_code: Some(qr_code.to_string()),
            }
        })
        .collect()
}

/// Writes the demonstration dataset through the given repositories.
///
/// Intended for empty databases; existing keys surface as
/// `RepoError::Duplicate`.
pub fn seed<R, G>(references: &R, registrations: &G) -> RepoResult<()>
where
    R: ReferenceRepository,
    G: RegistrationRepository,
{
    let reference = demo_reference();
    for (list, names) in [
        (NameList::Users, &reference.users),
        (NameList::Locations, &reference.locations),
        (NameList::Purposes, &reference.purposes),
    ] {
        for name in names {
            references.add_name(list, name)?;
        }
    }
    for category in &reference.categories {
        references.create_category(category)?;
    }
    for product in &reference.products {
        references.create_product(product)?;
    }
    let rows = demo_registrations();
    for registration in &rows {
        registrations.create_registration(registration)?;
    }

    info!(
        "event=demo_seed module=demo status=ok products={} registrations={}",
        reference.products.len(),
        rows.len()
    );
    Ok(())
}
