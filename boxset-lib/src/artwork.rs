use boxset_core::{Collection, ImageDescriptor, ImageKind, RemoteCandidate, ResolvedImage};

/// Locale preferred when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Pick an image of `kind`: the first one in `locale`, else the first one
/// of that kind at all.
pub fn select_image<'a, I>(images: I, kind: ImageKind, locale: &str) -> Option<&'a ImageDescriptor>
where
    I: IntoIterator<Item = &'a ImageDescriptor>,
{
    let mut fallback = None;
    for image in images.into_iter().filter(|img| img.kind == kind) {
        if image
            .locale
            .as_deref()
            .is_some_and(|l| l.eq_ignore_ascii_case(locale))
        {
            return Some(image);
        }
        fallback.get_or_insert(image);
    }
    fallback
}

/// Resolve the banner and poster for a collection.
///
/// Member artwork wins outright; remote images are only considered for
/// kinds no member provides. Kinds with no image anywhere stay unresolved.
pub fn resolve_artwork(
    collection: &mut Collection,
    candidate: Option<&RemoteCandidate>,
    locale: &str,
) {
    for kind in ImageKind::ALL {
        let resolved = match collection.local_artwork(kind) {
            Some(path) => Some(ResolvedImage::local(kind, path.clone())),
            None => candidate
                .and_then(|c| select_image(&c.images, kind, locale))
                .map(ResolvedImage::remote),
        };
        if resolved.is_none() {
            log::debug!("'{}': no {} found", collection.name, kind);
        }
        collection.set_image(kind, resolved);
    }
}
