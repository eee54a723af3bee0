mod add;
mod query;
mod useredit;

pub use add::AddReview as Add;
pub use query::{ListQuery, PageQuery, SearchQuery};
pub use useredit::UserEditReview as UserEdit;
