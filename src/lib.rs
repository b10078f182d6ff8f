/*!
# Score Dashboard

A small web application that takes an uploaded spreadsheet of student
pre/post summative scores and charts it in the browser.

## Overview

A user uploads a CSV or XLSX sheet. The server stores the file in a
scratch directory, reads it into a raw table, maps its headers onto the
three canonical fields (name, pre score, post score), drops rows that do not
carry a name and two numeric scores, and publishes the result as the record
set served to the dashboard.

## Architecture

### Ingestion
- **saving**: filename sanitization and writing uploads to the scratch directory
- **loader**: CSV (`csv`) and XLSX (`calamine`) readers producing a [`RawTable`]

### Normalization
- **columns**: enumerated header mapping onto [`CanonicalField`]
- **normalizer**: numeric coercion and row cleaning

### Presentation
- **store**: the published record set, replaced atomically on each upload
- **summary**: averages and weak-record flags mirrored from the dashboard
- **app**: routing and handlers (requires the `web` feature)

## HTTP Endpoints

- `GET /` - Upload form
- `POST /upload` - Multipart upload (field `file`), redirects to the dashboard
- `GET /dashboard` - Chart.js dashboard page
- `GET /data` - Current records as a JSON array
- `GET /summary` - Averages and weak names
- `GET /health` - Liveness check
*/

pub mod columns;
pub mod error;
pub mod loader;
pub mod normalizer;
pub mod record;
pub mod saving;
pub mod store;
pub mod summary;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod config;

pub use columns::{CanonicalField, ColumnMap};
pub use error::UploadError;
pub use loader::{LoadError, UploadFormat};
pub use normalizer::{NormalizeError, Normalized, normalize};
pub use record::{RawCell, RawTable, Record, RecordSet};
pub use store::RecordStore;
pub use summary::Summary;
