//! Club model -> entity mapper

use club_core::entities::Club;
use club_core::value_objects::ClubId;

use crate::models::ClubModel;

impl From<ClubModel> for Club {
    fn from(model: ClubModel) -> Self {
        Club {
            id: ClubId::new(model.id),
            name: model.club_name,
            location: model.location,
            description: model.description,
            created_at: model.created_at,
        }
    }
}
