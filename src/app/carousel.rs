//! Looping media carousel

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    pub id: usize,
    pub title: String,
    pub image: String,
}

/// Cursor over a list of slides that wraps at both ends
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    slides: Vec<Slide>,
    index: usize,
}

impl Carousel {
    /// Build one slide per image, all captioned with `title`
    ///
    /// `limit` keeps only the first images (listing cards show two).
    pub fn from_images(title: &str, images: &[String], limit: Option<usize>) -> Self {
        let slides = images
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .enumerate()
            .map(|(id, image)| Slide {
                id,
                title: title.to_string(),
                image: image.clone(),
            })
            .collect();
        Self { slides, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.index)
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) -> Option<&Slide> {
        if !self.slides.is_empty() {
            self.index = (self.index + 1) % self.slides.len();
        }
        self.current()
    }

    pub fn prev(&mut self) -> Option<&Slide> {
        if !self.slides.is_empty() {
            self.index = (self.index + self.slides.len() - 1) % self.slides.len();
        }
        self.current()
    }

    /// Jump to slide `index`, wrapping past the end
    pub fn seek(&mut self, index: usize) -> Option<&Slide> {
        if !self.slides.is_empty() {
            self.index = index % self.slides.len();
        }
        self.current()
    }

    /// Indicator dots, the current slide filled
    pub fn indicators(&self) -> String {
        (0..self.slides.len())
            .map(|i| if i == self.index { "●" } else { "○" })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
