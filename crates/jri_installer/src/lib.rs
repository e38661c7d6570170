//! Selection and acquisition of Java runtimes from several
//! distribution sources (Mojang, Adoptium, Azul).
//!
//! The flow, leaves first:
//! - [`VersionCatalog`] lazily loads the major version list
//!   per vendor from an injected [`MetadataSource`].
//! - [`resolve_variants`] narrows a major version down to the
//!   builds that run on this OS/architecture.
//! - [`SelectionState`] tracks the cascading
//!   vendor → major → variant choice and gates installs behind
//!   its `installable` predicate.
//! - [`InstallOrchestrator`] turns a confirmed selection into a
//!   download/verify task ([`AcquisitionTask`]) and guarantees a
//!   clean destination on failure or abort.
//!
//! Presentation (dialogs, progress bars) is deliberately absent;
//! hook a UI up to the progress channel and the [`jri_core::AbortFlag`].

pub mod catalog;
mod compression;
pub mod download;
mod hashing;
mod install;
pub mod json;
mod platform;
mod selection;
mod vendor;

pub use catalog::{CatalogError, HttpMetadataSource, MetadataSource, VersionCatalog};
pub use compression::extract_tar_gz;
pub use download::{AcquisitionTask, ArchiveDownloadTask, ManifestDownloadTask, TaskError};
pub use hashing::ChecksumKind;
pub use install::{InstallError, InstallOrchestrator, InstallOutcome};
pub use json::list::{DownloadKind, MajorVersionEntry, PlatformVariant};
pub use platform::{resolve_variants, HostPlatform};
pub use selection::SelectionState;
pub use vendor::{Vendor, VENDORS};
