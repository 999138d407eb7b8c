use std::collections::{HashMap, HashSet};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::entities::review;

pub const SLUG_MAX_LEN: usize = 160;
pub const IMAGE_PATH_MAX_LEN: usize = 100;

pub const DEFAULT_MOVIE_YEAR: i16 = 2024;
pub const DEFAULT_MOVIE_COUNTRY: &str = "Россия";

/// Where uploaded images of each kind live, relative to the media root.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ImageKind {
    ActorPhoto,
    Poster,
    Shot,
}

impl ImageKind {
    pub const ALL: [ImageKind; 3] = [ImageKind::ActorPhoto, ImageKind::Poster, ImageKind::Shot];

    pub fn upload_dir(self) -> &'static str {
        match self {
            ImageKind::ActorPhoto => "actors/",
            ImageKind::Poster => "movies/",
            ImageKind::Shot => "movie_shots/",
        }
    }

    pub fn upload_path(self, file_name: &str) -> String {
        let file_name = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
        format!("{}{}", self.upload_dir(), file_name)
    }

    /// Checks a stored path is safe and sits directly in this kind's
    /// upload directory.
    pub fn check(self, value: &str) -> Result<(), ValidationError> {
        validate_image_path(value)?;
        match value.strip_prefix(self.upload_dir()) {
            Some(name) if !name.is_empty() && !name.contains(['/', '\\']) => Ok(()),
            _ => Err(ValidationError::new("image_upload_dir")),
        }
    }
}

/// A rating star value, always within 1..=5.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub struct StarValue(i16);

impl StarValue {
    pub const MIN: i16 = 1;
    pub const MAX: i16 = 5;

    pub fn from_value(value: i16) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> i16 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = StarValue> {
        (Self::MIN..=Self::MAX).map(StarValue)
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewCategory {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(custom(function = "validate_slug"))]
    pub url: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewGenre {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(custom(function = "validate_slug"))]
    pub url: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewActor {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub age: i16,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(custom(function = "validate_actor_image"))]
    pub image: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewMovie {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub tagline: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(custom(function = "validate_poster"))]
    pub poster: String,
    #[serde(default = "default_year")]
    #[validate(range(min = 0))]
    pub year: i16,
    #[serde(default = "default_country")]
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    #[serde(default = "today")]
    pub world_premiere: Date,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub budget: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub fees_in_usa: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub fees_in_world: i32,
    #[serde(default)]
    pub category_id: Option<i32>,
    #[validate(custom(function = "validate_slug"))]
    pub url: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub directors: Vec<i32>,
    #[serde(default)]
    pub actors: Vec<i32>,
    #[serde(default)]
    pub genres: Vec<i32>,
}

fn default_year() -> i16 {
    DEFAULT_MOVIE_YEAR
}

fn default_country() -> String {
    DEFAULT_MOVIE_COUNTRY.to_string()
}

fn today() -> Date {
    jiff::Zoned::now().date()
}

impl NewMovie {
    /// A movie with the catalogue defaults: empty tagline, no money figures,
    /// premiering today, not a draft and with no associations.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        poster: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            tagline: String::new(),
            description: description.into(),
            poster: poster.into(),
            year: default_year(),
            country: default_country(),
            world_premiere: today(),
            budget: 0,
            fees_in_usa: 0,
            fees_in_world: 0,
            category_id: None,
            url: url.into(),
            draft: false,
            directors: Vec::new(),
            actors: Vec::new(),
            genres: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewMovieShot {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(custom(function = "validate_shot_image"))]
    pub image: String,
    pub movie_id: i32,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewRating {
    #[validate(ip, length(max = 15))]
    pub ip: String,
    pub star_id: i32,
    pub movie_id: i32,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewReview {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 5000))]
    pub text: String,
    #[serde(default)]
    pub parent_id: Option<i32>,
    pub movie_id: i32,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieFilter {
    pub category_id: Option<i32>,
    pub genre_id: Option<i32>,
    pub year: Option<i16>,
    /// Public listings leave this off.
    #[serde(default)]
    pub include_drafts: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MovieScore {
    pub votes: u64,
    pub average: Option<f64>,
}

impl MovieScore {
    pub fn from_values(values: &[i16]) -> Self {
        let votes = values.len() as u64;
        let average = (votes > 0)
            .then(|| values.iter().map(|v| f64::from(*v)).sum::<f64>() / votes as f64);
        Self { votes, average }
    }
}

/// A review with its replies, oldest first at every level.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReviewNode {
    pub review: review::Model,
    pub replies: Vec<ReviewNode>,
}

/// Arranges a movie's reviews into reply trees. A review whose parent is not
/// in `reviews` is treated as top-level.
pub fn build_review_thread(reviews: Vec<review::Model>) -> Vec<ReviewNode> {
    let ids: HashSet<i32> = reviews.iter().map(|r| r.id).collect();
    let mut children: HashMap<Option<i32>, Vec<review::Model>> = HashMap::new();

    for review in reviews {
        let parent = review.parent_id.filter(|p| ids.contains(p));
        children.entry(parent).or_default().push(review);
    }
    // Newest first so `pop` yields the oldest.
    for list in children.values_mut() {
        list.sort_by_key(|r| std::cmp::Reverse(r.id));
    }

    struct Open {
        review: review::Model,
        pending: Vec<review::Model>,
        replies: Vec<ReviewNode>,
    }

    let mut top_level = children.remove(&None).unwrap_or_default();
    let mut stack: Vec<Open> = Vec::new();
    let mut roots = Vec::new();

    loop {
        let next = match stack.last_mut() {
            Some(open) => open.pending.pop(),
            None => match top_level.pop() {
                Some(review) => Some(review),
                None => break,
            },
        };

        match next {
            Some(review) => {
                let pending = children.remove(&Some(review.id)).unwrap_or_default();
                stack.push(Open { review, pending, replies: Vec::new() });
            }
            None => {
                let Some(done) = stack.pop() else { break };
                let node = ReviewNode { review: done.review, replies: done.replies };
                match stack.last_mut() {
                    Some(parent) => parent.replies.push(node),
                    None => roots.push(node),
                }
            }
        }
    }

    roots
}

/// Slugs are ASCII letters, digits, hyphens and underscores.
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.len() > SLUG_MAX_LEN {
        return Err(ValidationError::new("slug_length"));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(ValidationError::new("slug_chars"));
    }
    Ok(())
}

pub fn validate_actor_image(value: &str) -> Result<(), ValidationError> {
    ImageKind::ActorPhoto.check(value)
}

pub fn validate_poster(value: &str) -> Result<(), ValidationError> {
    ImageKind::Poster.check(value)
}

pub fn validate_shot_image(value: &str) -> Result<(), ValidationError> {
    ImageKind::Shot.check(value)
}

/// Stored image paths are relative to the media root and must stay inside it.
pub fn validate_image_path(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.len() > IMAGE_PATH_MAX_LEN {
        return Err(ValidationError::new("image_path_length"));
    }
    if value.starts_with('/') || value.starts_with('\\') || value.contains(':') {
        return Err(ValidationError::new("image_path_absolute"));
    }
    if value.split(['/', '\\']).any(|part| part == "..") {
        return Err(ValidationError::new("image_path_traversal"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: i32, parent_id: Option<i32>) -> review::Model {
        review::Model {
            id,
            email: "a@example.com".to_string(),
            name: "a".to_string(),
            text: "text".to_string(),
            parent_id,
            movie_id: 1,
        }
    }

    #[test]
    fn slugs() {
        assert!(validate_slug("the-matrix_1999").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("with space").is_err());
        assert!(validate_slug("фильм").is_err());
        assert!(validate_slug(&"a".repeat(SLUG_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn image_paths_stay_relative() {
        assert!(validate_image_path("movies/poster.jpg").is_ok());
        assert!(validate_image_path("/etc/passwd").is_err());
        assert!(validate_image_path("movies/../../secret").is_err());
        assert!(validate_image_path("C:\\poster.jpg").is_err());
    }

    #[test]
    fn images_must_sit_in_their_kind_directory() {
        assert!(validate_actor_image("actors/lead.jpg").is_ok());
        assert!(validate_actor_image("movie_shots/not_an_actor.jpg").is_err());
        assert!(validate_poster("movies/x.jpg").is_ok());
        assert!(validate_poster("movies/").is_err());
        assert!(validate_poster("movies/nested/x.jpg").is_err());
        assert!(validate_shot_image("movie_shots/still.png").is_ok());
        assert!(validate_shot_image("actors/still.png").is_err());
    }

    #[test]
    fn upload_paths_use_kind_directory_and_base_name() {
        assert_eq!(ImageKind::Poster.upload_path("poster.jpg"), "movies/poster.jpg");
        assert_eq!(ImageKind::Shot.upload_path("../x/still.png"), "movie_shots/still.png");
        assert_eq!(ImageKind::ActorPhoto.upload_dir(), "actors/");
    }

    #[test]
    fn star_values_are_bounded() {
        assert_eq!(StarValue::from_value(0), None);
        assert_eq!(StarValue::from_value(6), None);
        assert_eq!(StarValue::from_value(3).map(StarValue::get), Some(3));
        assert_eq!(StarValue::all().map(StarValue::get).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn movie_defaults_validate() {
        let movie = NewMovie::new("X", "About X", "movies/x.jpg", "x");
        assert!(movie.validate().is_ok());
        assert_eq!(movie.year, DEFAULT_MOVIE_YEAR);
        assert!(!movie.draft);

        let movie = NewMovie { budget: -1, ..movie };
        assert!(movie.validate().is_err());
    }

    #[test]
    fn movie_input_fills_in_defaults() {
        let before = today();
        let movie: NewMovie = serde_json::from_str(
            r#"{"title":"X","description":"About X","poster":"movies/x.jpg","url":"x"}"#,
        )
        .unwrap();
        let after = today();

        assert_eq!(movie.tagline, "");
        assert_eq!(movie.year, DEFAULT_MOVIE_YEAR);
        assert_eq!(movie.country, DEFAULT_MOVIE_COUNTRY);
        assert!(before <= movie.world_premiere && movie.world_premiere <= after);
        assert_eq!((movie.budget, movie.fees_in_usa, movie.fees_in_world), (0, 0, 0));
        assert_eq!(movie.category_id, None);
        assert!(!movie.draft);
        assert!(movie.directors.is_empty() && movie.actors.is_empty() && movie.genres.is_empty());
        assert!(movie.validate().is_ok());

        let review: NewReview = serde_json::from_str(
            r#"{"email":"a@example.com","name":"A","text":"Fine","movie_id":1}"#,
        )
        .unwrap();
        assert_eq!(review.parent_id, None);
    }

    #[test]
    fn review_rules() {
        let input = NewReview {
            email: "reader@example.com".to_string(),
            name: "Reader".to_string(),
            text: "Great".to_string(),
            parent_id: None,
            movie_id: 1,
        };
        assert!(input.validate().is_ok());

        let bad_email = NewReview { email: "not-an-address".to_string(), ..input.clone() };
        assert!(bad_email.validate().is_err());

        let too_long = NewReview { text: "x".repeat(5001), ..input };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn rating_ip_must_be_an_address() {
        let input = NewRating { ip: "127.0.0.1".to_string(), star_id: 1, movie_id: 1 };
        assert!(input.validate().is_ok());
        let input = NewRating { ip: "localhost".to_string(), ..input };
        assert!(input.validate().is_err());
    }

    #[test]
    fn scores() {
        assert_eq!(MovieScore::from_values(&[]), MovieScore { votes: 0, average: None });
        assert_eq!(MovieScore::from_values(&[4, 5]), MovieScore { votes: 2, average: Some(4.5) });
    }

    #[test]
    fn thread_nests_replies() {
        let thread = build_review_thread(vec![
            review(3, Some(1)),
            review(1, None),
            review(2, None),
            review(4, Some(3)),
            review(5, Some(99)),
        ]);

        let top: Vec<i32> = thread.iter().map(|n| n.review.id).collect();
        assert_eq!(top, vec![1, 2, 5]);
        assert_eq!(thread[0].replies.len(), 1);
        assert_eq!(thread[0].replies[0].review.id, 3);
        assert_eq!(thread[0].replies[0].replies[0].review.id, 4);
        assert!(thread[1].replies.is_empty());
    }

    #[test]
    fn long_reply_chains_do_not_recurse() {
        let depth = 20_000;
        let chain: Vec<review::Model> =
            (1..=depth).map(|id| review(id, (id > 1).then_some(id - 1))).collect();

        let thread = build_review_thread(chain);

        assert_eq!(thread.len(), 1);
        let mut node = &thread[0];
        let mut seen = 1;
        while let Some(reply) = node.replies.first() {
            assert_eq!(reply.review.parent_id, Some(node.review.id));
            node = reply;
            seen += 1;
        }
        assert_eq!(seen, depth);
        // Dropping a deep tree recurses too; unwind it by hand.
        let mut rest = thread;
        while let Some(mut node) = rest.pop() {
            rest.append(&mut node.replies);
        }
    }
}
