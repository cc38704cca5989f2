//! Shipping address form with opt-in persistence.
//!
//! When saving is on, every edit is mirrored to the local store. Turning it
//! off deletes the stored address at once; turning it on stores the current
//! form verbatim. The preference itself is stored on every toggle.
//!
//! While saving is off, the form can be kept as a draft in the session
//! store so it survives between runs until logout. The draft never touches
//! the saved address key.

use std::sync::Arc;

use bestie_core::{AddressField, ShippingAddress};
use tracing::debug;

use crate::error::Result;
use crate::state::AppState;
use crate::storage::{KeyValueStore, keys};

/// The address form and its storage.
#[derive(Clone)]
pub struct AddressBook {
    store: Arc<dyn KeyValueStore>,
    draft: Option<Arc<dyn KeyValueStore>>,
    address: ShippingAddress,
    save: bool,
}

impl std::fmt::Debug for AddressBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressBook")
            .field("address", &self.address)
            .field("save", &self.save)
            .field("draft", &self.draft.is_some())
            .finish_non_exhaustive()
    }
}

impl AddressBook {
    /// Load the saved address and preference.
    ///
    /// Unreadable stored values are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store cannot be read.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let address: ShippingAddress = store
            .get_json(keys::SAVED_SHIPPING_ADDRESS)?
            .unwrap_or_default();
        let save: bool = store
            .get_json(keys::SAVE_ADDRESS_PREFERENCE)?
            .unwrap_or_default();

        debug!(save, complete = address.is_complete(), "Address book loaded");
        Ok(Self {
            store,
            draft: None,
            address,
            save,
        })
    }

    /// Load the address book for an app state, with its session draft.
    ///
    /// # Errors
    ///
    /// Returns an error if either store cannot be read.
    pub fn open(state: &AppState) -> Result<Self> {
        Self::load(state.local_store().clone())?.with_draft(state.session_store().clone())
    }

    /// Keep unsaved edits in `session` while saving is off.
    ///
    /// A stored draft replaces the loaded form when saving is off.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub fn with_draft(mut self, session: Arc<dyn KeyValueStore>) -> Result<Self> {
        if !self.save {
            if let Some(draft) = session.get_json::<ShippingAddress>(keys::ADDRESS_DRAFT)? {
                debug!(complete = draft.is_complete(), "Address draft restored");
                self.address = draft;
            }
        }
        self.draft = Some(session);
        Ok(self)
    }

    fn mirror(&self) -> Result<()> {
        if self.save {
            self.store
                .set_json(keys::SAVED_SHIPPING_ADDRESS, &self.address)?;
        } else if let Some(draft) = &self.draft {
            draft.set_json(keys::ADDRESS_DRAFT, &self.address)?;
        }
        Ok(())
    }

    #[must_use]
    pub const fn address(&self) -> &ShippingAddress {
        &self.address
    }

    /// Whether edits are mirrored to storage.
    #[must_use]
    pub const fn save_enabled(&self) -> bool {
        self.save
    }

    /// Edit one field.
    ///
    /// # Errors
    ///
    /// Returns an error if mirroring to storage fails; the edit itself is kept.
    pub fn set_field(&mut self, field: AddressField, value: impl Into<String>) -> Result<()> {
        self.address.set(field, value);
        self.mirror()
    }

    /// Replace the whole form.
    ///
    /// # Errors
    ///
    /// Returns an error if mirroring to storage fails.
    pub fn set_address(&mut self, address: ShippingAddress) -> Result<()> {
        self.address = address;
        self.mirror()
    }

    /// Turn saving on or off.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn set_save(&mut self, save: bool) -> Result<()> {
        self.save = save;
        self.store.set_json(keys::SAVE_ADDRESS_PREFERENCE, &save)?;

        if save {
            if let Some(draft) = &self.draft {
                draft.remove(keys::ADDRESS_DRAFT)?;
            }
        } else {
            self.store.remove(keys::SAVED_SHIPPING_ADDRESS)?;
        }
        self.mirror()?;
        debug!(save, "Address saving toggled");
        Ok(())
    }
}
