//! The concrete page views wired into the view registry.
//!
//! Each view builds an HTML fragment from catalog data. Views stay thin:
//! content lookup lives in the catalog, markup rendering in folio-markup,
//! and navigation in the view manager.

mod about;
mod error;
mod feed;
mod home;
mod portfolio;
mod reader;
mod viewer;

use std::sync::Arc;

use folio_fetch::SvgCache;
use folio_index::Catalog;
use folio_runtime::{ViewDescriptor, ViewRegistry};

pub use about::AboutView;
pub use error::ErrorView;
pub use feed::PostFeedView;
pub use home::HomeView;
pub use portfolio::PortfolioView;
pub use reader::PostReaderView;
pub use viewer::ProjectViewerView;

/// Shared collaborators handed to every view.
pub struct SiteContext {
    pub catalog: Catalog,
    pub svg: SvgCache,
    pub posts_per_page: usize,
}

/// Builds the site's view registry.
///
/// PostReader, ProjectViewer, and Error are secret: they are reached
/// through internal navigation or a deep-link directive, never as a
/// direct target.
pub fn registry(context: Arc<SiteContext>) -> ViewRegistry {
    ViewRegistry::new()
        .register(ViewDescriptor::new("Home", Arc::new(HomeView)))
        .register(ViewDescriptor::new(
            "PostFeed",
            Arc::new(PostFeedView::new(context.clone())),
        ))
        .register(ViewDescriptor::new(
            "Portfolio",
            Arc::new(PortfolioView::new(context.clone())),
        ))
        .register(ViewDescriptor::new("About", Arc::new(AboutView)))
        .register(
            ViewDescriptor::new("PostReader", Arc::new(PostReaderView::new(context.clone())))
                .with_parent("PostFeed")
                .secret(),
        )
        .register(
            ViewDescriptor::new(
                "ProjectViewer",
                Arc::new(ProjectViewerView::new(context)),
            )
            .with_parent("Portfolio")
            .secret(),
        )
        .register(ViewDescriptor::new("Error", Arc::new(ErrorView)).secret())
}
