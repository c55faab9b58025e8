//! Catalog file formats.
//!
//! Only gettext `.po` catalogs are supported; the [`crate::traits::Parser`]
//! implementation for [`crate::Catalog`] lives in [`po`].

pub mod po;
