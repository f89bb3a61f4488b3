//! Floating decorative glyphs behind the page content.

use eframe::egui;
use rand::Rng;

#[derive(Debug, Clone, Copy)]
struct Particle {
    /// Position as a fraction of the page rect.
    x: f32,
    y: f32,
    delay: f32,
    period: f32,
}

pub struct ParticleField {
    particles: Vec<Particle>,
    glyph: &'static str,
    size: f32,
    color: egui::Color32,
}

impl ParticleField {
    pub fn scatter(count: usize, glyph: &'static str, size: f32, color: egui::Color32) -> Self {
        let mut rng = rand::rng();
        let particles = (0..count)
            .map(|_| Particle {
                x: rng.random_range(0.0..1.0),
                y: rng.random_range(0.0..1.0),
                delay: rng.random_range(0.0..5.0),
                period: rng.random_range(4.0..6.0),
            })
            .collect();
        Self {
            particles,
            glyph,
            size,
            color,
        }
    }

    /// Draws every particle at its bobbing/pulsing position for `time`.
    pub fn paint(&self, painter: &egui::Painter, rect: egui::Rect, time: f64) {
        for particle in &self.particles {
            let phase = ((time as f32 + particle.delay) / particle.period) * std::f32::consts::TAU;
            let bob = phase.sin() * 20.0;
            let scale = 1.0 + 0.2 * phase.cos();
            let alpha = 0.35 + 0.3 * (phase.sin() * 0.5 + 0.5);
            let pos = egui::pos2(
                rect.left() + particle.x * rect.width(),
                rect.top() + particle.y * rect.height() + bob,
            );
            painter.text(
                pos,
                egui::Align2::CENTER_CENTER,
                self.glyph,
                egui::FontId::proportional(self.size * scale),
                self.color.gamma_multiply(alpha),
            );
        }
    }
}
