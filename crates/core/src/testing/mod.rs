//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of every external seam (catalog,
//! image download, scorer, object storage, notification), so full runs can be
//! driven without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use segregator_core::testing::{fixtures, MockImageFetcher, MockImageSource, MockScorer};
//!
//! let source = MockImageSource::new();
//! let fetcher = MockImageFetcher::new();
//! let scorer = MockScorer::new();
//!
//! let item = fixtures::catalog_item("abc123");
//! fetcher.add_image(&item.fetch_url, fixtures::solid_png([255, 0, 0])).await;
//! source.push_item(item).await;
//! scorer.push_probabilities(vec![0.9, 0.1]).await;
//! ```

mod mock_fetcher;
mod mock_notifier;
mod mock_object_store;
mod mock_scorer;
mod mock_source;

pub use mock_fetcher::MockImageFetcher;
pub use mock_notifier::MockNotifier;
pub use mock_object_store::{MockObjectStore, RecordedPut};
pub use mock_scorer::MockScorer;
pub use mock_source::MockImageSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::io::Cursor;

    use image::{ImageFormat, Rgb, RgbImage};

    use crate::catalog::CatalogItem;
    use crate::classify::DecodedImage;

    /// Create a catalog item with a fake CDN URL derived from the id.
    pub fn catalog_item(id: &str) -> CatalogItem {
        CatalogItem::new(id, format!("https://cdn.example.test/images/{}.jpg", id))
    }

    /// Create `count` catalog items named `cat-0`, `cat-1`, ...
    pub fn catalog_items(count: usize) -> Vec<CatalogItem> {
        (0..count)
            .map(|i| catalog_item(&format!("cat-{}", i)))
            .collect()
    }

    /// A 16x16 raster filled with one color.
    pub fn solid_raster(rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(16, 16, Rgb(rgb))
    }

    /// A decoded image filled with one color.
    pub fn solid_image(rgb: [u8; 3]) -> DecodedImage {
        DecodedImage::from_rgb(solid_raster(rgb))
    }

    /// PNG bytes of a single-color image. Lossless, so channel means are exact.
    pub fn solid_png(rgb: [u8; 3]) -> Vec<u8> {
        encode(solid_raster(rgb), ImageFormat::Png)
    }

    /// JPEG bytes of a single-color image. Colors shift slightly.
    pub fn solid_jpeg(rgb: [u8; 3]) -> Vec<u8> {
        encode(solid_raster(rgb), ImageFormat::Jpeg)
    }

    fn encode(raster: RgbImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        raster
            .write_to(&mut buffer, format)
            .expect("encoding an in-memory RGB raster cannot fail");
        buffer.into_inner()
    }
}
