//! Listing resolution: catalog lookup, remote listing, projection.
//!
//! A resolution is a pure request/response pipeline with a fixed step order:
//! college lookup, program lookup, remote listing, hidden-entry exclusion,
//! natural sort, then slug/child attachment. There is no session state and no
//! caching; concurrent resolutions are independent.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::debug;

use crate::catalog::Catalog;
use crate::classify;
use crate::error::Result;
use crate::models::{College, FileSummary, RemoteFile, ResolvedFile, TypeFilter};
use crate::storage::RemoteStorage;
use crate::text;

/// Administrative folders are hidden from every listing by convention.
const HIDDEN_PREFIX: &str = "__";

/// How far below the listed container a resolution walks. One level is the
/// maximum; there is no unbounded tree walk.
#[derive(Debug, Clone, Copy)]
pub enum Depth {
    /// The listing itself, nothing attached.
    Flat,
    /// Attach each entry's own children, restricted by the given filter.
    Children(TypeFilter),
}

pub struct ListingResolver {
    catalog: Arc<Catalog>,
    storage: Arc<dyn RemoteStorage>,
}

impl ListingResolver {
    pub fn new(catalog: Arc<Catalog>, storage: Arc<dyn RemoteStorage>) -> Self {
        Self { catalog, storage }
    }

    /// College page: the programs come straight from the catalog, no remote
    /// call involved.
    pub fn college(&self, college_id: &str) -> Result<&College> {
        self.catalog.college(college_id)
    }

    /// Program page: the area folders under the program's backing container,
    /// slugged for stable URLs.
    pub async fn program_areas(
        &self,
        college_id: &str,
        program_tag: &str,
    ) -> Result<Vec<ResolvedFile>> {
        let program = self.catalog.program(college_id, program_tag)?;
        self.resolve(&program.id, TypeFilter::Folder, Depth::Flat, true)
            .await
    }

    /// Area page: the parameter folders inside `area_container`, each carrying
    /// its pdf documents one level down.
    pub async fn area_parameters(
        &self,
        college_id: &str,
        program_tag: &str,
        area_container: &str,
    ) -> Result<Vec<ResolvedFile>> {
        // the navigation path is validated before any remote I/O happens
        self.catalog.program(college_id, program_tag)?;
        self.resolve(
            area_container,
            TypeFilter::Folder,
            Depth::Children(TypeFilter::Pdf),
            true,
        )
        .await
    }

    /// Leaf documents of a single parameter folder.
    pub async fn parameter_documents(
        &self,
        college_id: &str,
        program_tag: &str,
        container: &str,
    ) -> Result<Vec<ResolvedFile>> {
        self.catalog.program(college_id, program_tag)?;
        self.resolve(container, TypeFilter::Pdf, Depth::Flat, false)
            .await
    }

    /// Generic listing with a caller-supplied filter name. Unknown names fail
    /// with a configuration error before any remote call.
    pub async fn listing(
        &self,
        college_id: &str,
        program_tag: &str,
        filter_name: &str,
    ) -> Result<Vec<ResolvedFile>> {
        let filter = TypeFilter::from_name(filter_name)?;
        let program = self.catalog.program(college_id, program_tag)?;
        self.resolve(&program.id, filter, Depth::Flat, false).await
    }

    /// Raw-data projection of a program's unfiltered listing, for
    /// `application/json` responses.
    pub async fn file_summaries(
        &self,
        college_id: &str,
        program_tag: &str,
    ) -> Result<Vec<FileSummary>> {
        let program = self.catalog.program(college_id, program_tag)?;
        let mut files = self.fetch(&program.id, TypeFilter::Any).await?;
        text::sort_by_name(&mut files, |f| f.name.as_str(), false);
        Ok(classify::format_files_list(&files))
    }

    /// Core pipeline: list, exclude hidden entries, sort, project, and
    /// optionally attach one level of children. A failing child listing fails
    /// the whole resolution; partial results are never returned.
    pub async fn resolve(
        &self,
        container: &str,
        filter: TypeFilter,
        depth: Depth,
        with_slugs: bool,
    ) -> Result<Vec<ResolvedFile>> {
        let files = self.fetch(container, filter).await?;
        let mut resolved: Vec<ResolvedFile> =
            files.into_iter().map(|f| project(f, with_slugs)).collect();

        if let Depth::Children(child_filter) = depth {
            let nested = try_join_all(
                resolved
                    .iter()
                    .map(|item| self.fetch(&item.id, child_filter)),
            )
            .await?;
            for (item, children) in resolved.iter_mut().zip(nested) {
                item.files = Some(children.into_iter().map(|f| project(f, false)).collect());
            }
        }

        debug!(container, count = resolved.len(), "resolved listing");
        Ok(resolved)
    }

    /// One remote listing call, hidden entries excluded, naturally sorted.
    async fn fetch(&self, container: &str, filter: TypeFilter) -> Result<Vec<RemoteFile>> {
        let mut files = self.storage.list_children(container, filter).await?;
        files.retain(|f| !f.name.starts_with(HIDDEN_PREFIX));
        text::sort_by_name(&mut files, |f| f.name.as_str(), false);
        Ok(files)
    }
}

/// Shape one remote file for the presentation layer. When a slug is wanted
/// the display fields come with it: area folders following the
/// `area-<n>-...` convention split into an area label and a cleaned title,
/// anything else gets its title unslugged from the slug.
fn project(file: RemoteFile, with_slug: bool) -> ResolvedFile {
    let slug = with_slug.then(|| text::slugify(&file.name));
    let (area, title) = match slug.as_deref() {
        Some(slug) => match text::extract_area_and_title(slug) {
            Some((area, title)) => (Some(area), Some(title)),
            None => (None, Some(text::unslugify(slug))),
        },
        None => (None, None),
    };
    ResolvedFile {
        id: file.id,
        file_type: classify::classify(&file.mime_type),
        name: file.name,
        slug,
        area,
        title,
        created_time: file.created_time,
        web_view_link: file.web_view_link,
        thumbnail_link: file.thumbnail_link,
        file_extension: file.file_extension,
        files: None,
    }
}
