//! Application state: the local snapshot of reference lists and registrations.
//!
//! # Responsibility
//! - Load every collection from the data source, falling back to the demo
//!   dataset when the core lists cannot be loaded.
//! - Replace collections wholesale on refresh or push notification.
//! - Hand borrowed snapshots to the engine.
//!
//! # Invariants
//! - The data source is the source of truth; after a write the affected
//!   collection is re-fetched, never patched locally.
//! - Engine results are recomputed on every call; nothing is cached here.

use crate::demo::{demo_reference, demo_registrations};
use crate::engine::filter::FilterCriteria;
use crate::engine::history_view;
use crate::engine::stats::{product_chart_data, summarize, ChartSegment, Statistics};
use crate::model::query::{SortKey, SortOrder};
use crate::model::reference::{Category, NameList, Product};
use crate::model::registration::Registration;
use crate::repo::reference_repo::ReferenceRepository;
use crate::repo::registration_repo::RegistrationRepository;
use crate::repo::RepoResult;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Canonical reference lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub users: Vec<String>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub locations: Vec<String>,
    pub purposes: Vec<String>,
}

impl ReferenceData {
    /// Returns one of the plain-name lists.
    pub fn names(&self, list: NameList) -> &[String] {
        match list {
            NameList::Users => &self.users,
            NameList::Locations => &self.locations,
            NameList::Purposes => &self.purposes,
        }
    }

    fn names_mut(&mut self, list: NameList) -> &mut Vec<String> {
        match list {
            NameList::Users => &mut self.users,
            NameList::Locations => &mut self.locations,
            NameList::Purposes => &mut self.purposes,
        }
    }
}

/// Where the current snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    /// Loaded from the configured data source.
    Backend,
    /// Built-in demonstration dataset.
    Demo,
}

/// Local snapshot handed to the engine.
#[derive(Debug, Clone)]
pub struct AppState {
    reference: ReferenceData,
    registrations: Vec<Registration>,
    origin: DataOrigin,
}

impl AppState {
    /// State holding the demonstration dataset.
    pub fn demo() -> Self {
        Self {
            reference: demo_reference(),
            registrations: demo_registrations(),
            origin: DataOrigin::Demo,
        }
    }

    /// State built from explicit collections (e.g. pushed by a subscriber).
    pub fn from_parts(reference: ReferenceData, registrations: Vec<Registration>) -> Self {
        Self {
            reference,
            registrations,
            origin: DataOrigin::Backend,
        }
    }

    /// Loads every collection, falling back to the demo dataset.
    ///
    /// # Contract
    /// - A failure on users, products or categories switches to the demo
    ///   dataset as a whole.
    /// - A failure on locations, purposes or registrations leaves only that
    ///   collection empty.
    pub fn load<R, G>(references: &R, registrations: &G) -> Self
    where
        R: ReferenceRepository,
        G: RegistrationRepository,
    {
        match Self::try_load(references, registrations) {
            Ok(state) => state,
            Err(err) => {
                warn!("event=state_load module=state status=fallback source=demo error={err}");
                Self::demo()
            }
        }
    }

    /// Loads every collection; fails only when a core list fails.
    pub fn try_load<R, G>(references: &R, registrations: &G) -> RepoResult<Self>
    where
        R: ReferenceRepository,
        G: RegistrationRepository,
    {
        let users = references.list_names(NameList::Users)?;
        let products = references.list_products()?;
        let categories = references.list_categories()?;

        let reference = ReferenceData {
            users,
            products,
            categories,
            locations: or_empty("locations", references.list_names(NameList::Locations)),
            purposes: or_empty("purposes", references.list_names(NameList::Purposes)),
        };
        let registrations = or_empty("registrations", registrations.list_registrations());

        info!(
            "event=state_load module=state status=ok users={} products={} registrations={}",
            reference.users.len(),
            reference.products.len(),
            registrations.len()
        );
        Ok(Self::from_parts(reference, registrations))
    }

    pub fn origin(&self) -> DataOrigin {
        self.origin
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn replace_names(&mut self, list: NameList, names: Vec<String>) {
        *self.reference.names_mut(list) = names;
    }

    pub fn replace_products(&mut self, products: Vec<Product>) {
        self.reference.products = products;
    }

    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        self.reference.categories = categories;
    }

    pub fn replace_registrations(&mut self, registrations: Vec<Registration>) {
        self.registrations = registrations;
    }

    /// Re-fetches one name list after a write.
    pub fn refresh_names<R: ReferenceRepository>(
        &mut self,
        references: &R,
        list: NameList,
    ) -> RepoResult<()> {
        let names = references.list_names(list)?;
        self.replace_names(list, names);
        Ok(())
    }

    pub fn refresh_products<R: ReferenceRepository>(&mut self, references: &R) -> RepoResult<()> {
        let products = references.list_products()?;
        self.replace_products(products);
        Ok(())
    }

    pub fn refresh_categories<R: ReferenceRepository>(
        &mut self,
        references: &R,
    ) -> RepoResult<()> {
        let categories = references.list_categories()?;
        self.replace_categories(categories);
        Ok(())
    }

    pub fn refresh_registrations<G: RegistrationRepository>(
        &mut self,
        registrations: &G,
    ) -> RepoResult<()> {
        let rows = registrations.list_registrations()?;
        self.replace_registrations(rows);
        Ok(())
    }

    /// Filtered and sorted history for the current snapshot.
    pub fn history(
        &self,
        criteria: &FilterCriteria,
        sort_by: SortKey,
        order: SortOrder,
    ) -> Vec<Registration> {
        history_view(&self.registrations, criteria, sort_by, order)
    }

    pub fn statistics(&self, n: usize) -> Statistics {
        summarize(&self.registrations, n)
    }

    pub fn product_chart(&self) -> Vec<ChartSegment> {
        product_chart_data(&self.registrations)
    }
}

fn or_empty<T>(collection: &str, result: RepoResult<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        warn!("event=state_load module=state status=partial collection={collection} error={err}");
        Vec::new()
    })
}
