use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use sixcities_core::{Amenity, IMAGE_COUNT, RentalOffer, TemplateItem, round_to};

use crate::errors::GenerationError;

const PUBLICATION_WINDOW_MS: i64 = 365 * 24 * 60 * 60 * 1000;
/// Kept just under 0.025 so rounding to 6 decimals cannot reach the bound.
const MAX_JITTER: f64 = 0.025 - 1e-6;
const COORDINATE_DECIMALS: i32 = 6;
const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 5.0;
const FAVORITE_PROBABILITY: f64 = 0.3;
const AUTHOR_IDS: std::ops::RangeInclusive<u32> = 1..=1000;

/// Turns templates into randomized offers.
///
/// Each generator owns its random source; seeding it makes output reproducible.
#[derive(Debug, Clone)]
pub struct RecordGenerator {
    rng: ChaCha8Rng,
}

impl RecordGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_seed(rand::random()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate offer number `index` (0-based) relative to the current time.
    pub fn generate(
        &mut self,
        template: &TemplateItem,
        index: u64,
    ) -> Result<RentalOffer, GenerationError> {
        self.generate_at(template, index, Utc::now())
    }

    /// Generate offer number `index` with publication dates counted back from `now`.
    pub fn generate_at(
        &mut self,
        template: &TemplateItem,
        index: u64,
        now: DateTime<Utc>,
    ) -> Result<RentalOffer, GenerationError> {
        let (images, template_amenities) = template_lists(template)?;

        let offset = TimeDelta::milliseconds(self.rng.random_range(0..PUBLICATION_WINDOW_MS));
        let publication_date = (now - offset).to_rfc3339_opts(SecondsFormat::Millis, true);

        let base = template.city.coordinates();
        let latitude = round_to(base.latitude + self.jitter(), COORDINATE_DECIMALS);
        let longitude = round_to(base.longitude + self.jitter(), COORDINATE_DECIMALS);
        let rating = round_to(self.rng.random_range(MIN_RATING..=MAX_RATING), 1);
        let amenities = self.amenities(template_amenities);

        Ok(RentalOffer {
            title: format!("{} #{}", template.title, index + 1),
            description: template.description.clone(),
            publication_date,
            city: template.city,
            preview_image: template.preview_image.clone(),
            images: images.iter().take(IMAGE_COUNT).cloned().collect(),
            is_premium: template.is_premium.unwrap_or(false),
            is_favorite: self.rng.random_bool(FAVORITE_PROBABILITY),
            rating,
            home_type: template.home_type,
            rooms: template.rooms,
            guests: template.guests,
            price: template.price,
            amenities,
            author: format!(
                "https://example.com/users/{}",
                self.rng.random_range(AUTHOR_IDS)
            ),
            comments_count: 0,
            latitude,
            longitude,
        })
    }

    /// Uniformly pick the template for the next offer.
    pub fn pick_template<'t>(&mut self, templates: &'t [TemplateItem]) -> Option<&'t TemplateItem> {
        templates.choose(&mut self.rng)
    }

    /// Lazily generate `count` offers, each from a randomly picked template.
    pub fn stream<'a>(
        &'a mut self,
        templates: &'a [TemplateItem],
        count: u64,
        now: DateTime<Utc>,
    ) -> RecordStream<'a> {
        RecordStream {
            generator: self,
            templates,
            next: 0,
            count,
            now,
        }
    }

    fn jitter(&mut self) -> f64 {
        self.rng.random_range(-MAX_JITTER..MAX_JITTER)
    }

    /// Shuffled, duplicate-free draw from the template's amenities plus the
    /// full enumeration. Unknown template names are ignored.
    fn amenities(&mut self, template_amenities: &[String]) -> Vec<Amenity> {
        let mut pool: Vec<Amenity> = Vec::with_capacity(Amenity::ALL.len());
        let known = template_amenities
            .iter()
            .filter_map(|name| name.trim().parse::<Amenity>().ok());
        for amenity in known.chain(Amenity::ALL) {
            if !pool.contains(&amenity) {
                pool.push(amenity);
            }
        }

        let upper = Amenity::ALL.len().min(template_amenities.len() + 2);
        let take = self.rng.random_range(1..=upper);
        pool.shuffle(&mut self.rng);
        pool.truncate(take);
        pool
    }
}

/// Reject templates the generator cannot expand, before any output exists.
pub fn check_templates(templates: &[TemplateItem]) -> Result<(), GenerationError> {
    templates.iter().try_for_each(|template| template_lists(template).map(|_| ()))
}

fn template_lists(template: &TemplateItem) -> Result<(&[String], &[String]), GenerationError> {
    let images = template.images.as_deref().ok_or_else(|| {
        GenerationError::InvalidTemplate(format!("template '{}' has no images", template.title))
    })?;
    let amenities = template.amenities.as_deref().ok_or_else(|| {
        GenerationError::InvalidTemplate(format!("template '{}' has no amenities", template.title))
    })?;
    Ok((images, amenities))
}

/// Pull-based offer sequence; nothing is generated until `next` is called.
#[derive(Debug)]
pub struct RecordStream<'a> {
    generator: &'a mut RecordGenerator,
    templates: &'a [TemplateItem],
    next: u64,
    count: u64,
    now: DateTime<Utc>,
}

impl Iterator for RecordStream<'_> {
    type Item = Result<RentalOffer, GenerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let index = self.next;
        self.next += 1;

        let Some(template) = self.generator.pick_template(self.templates) else {
            self.next = self.count;
            return Some(Err(GenerationError::InvalidArgument(
                "at least one template is required".to_string(),
            )));
        };
        Some(self.generator.generate_at(template, index, self.now))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.count - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}
