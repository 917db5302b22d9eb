use crate::contacts::{is_listed, ContactBook};
use crate::{Reply, Viewer, VisibilityMode};

/// Decides whether a single viewer may see a single reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityFilter;

impl VisibilityFilter {
    pub fn new() -> Self {
        Self
    }

    pub fn is_visible(&self, reply: &Reply, viewer: &Viewer) -> bool {
        let contacts = ContactBook::for_viewer(viewer);
        self.is_visible_with(reply, viewer, &contacts)
    }

    /// Same as [`VisibilityFilter::is_visible`] with a prebuilt contact book,
    /// so a feed pass normalizes the viewer's contacts once.
    pub fn is_visible_with(&self, reply: &Reply, viewer: &Viewer, contacts: &ContactBook) -> bool {
        match reply.visibility {
            VisibilityMode::All => true,
            VisibilityMode::Contacts => {
                reply.is_authored_by(viewer)
                    || contacts.contains_opt(reply.author_phone_number.as_deref())
            }
            VisibilityMode::IndividualContacts => {
                reply.is_authored_by(viewer)
                    || is_listed(&viewer.phone_number, &reply.allowed_phone_numbers)
            }
        }
    }
}
