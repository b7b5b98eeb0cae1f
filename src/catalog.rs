//! Static destination catalog.
//!
//! The descriptive records behind the discovery pages: three curated
//! category lists covering the Nariño region. The catalog is read-only
//! content - selection state lives in the store, never here.

use crate::{Category, GeoPoint, Waypoint};
use once_cell::sync::Lazy;

fn destination(
    name: &str,
    category: Category,
    latitude: f64,
    longitude: f64,
    rating: f64,
    description: &str,
    image: &str,
) -> Waypoint {
    Waypoint {
        name: name.to_string(),
        category,
        position: GeoPoint::new(latitude, longitude),
        rating,
        description: description.to_string(),
        image: Some(image.to_string()),
    }
}

/// Regional dishes and food traditions.
pub fn gastronomy() -> Vec<Waypoint> {
    use Category::Gastronomy;
    vec![
        destination(
            "Cuy Asado de Sandoná",
            Gastronomy,
            1.287,
            -77.467,
            4.8,
            "Oven-roasted guinea pig, a traditional dish of the Andean highlands.",
            "/images/cuy-asado.jpg",
        ),
        destination(
            "Empanadas de Aponte",
            Gastronomy,
            1.418,
            -77.085,
            4.6,
            "Crisp empanadas filled with potato, egg and local spices.",
            "/images/empanadas.jpg",
        ),
        destination(
            "Helado de Paila de Pasto",
            Gastronomy,
            1.213,
            -77.281,
            4.9,
            "Artisanal ice cream hand-churned in a copper pan with local fruit.",
            "/images/helado-paila.jpg",
        ),
        destination(
            "Locro de Papa de Túquerres",
            Gastronomy,
            1.090,
            -77.618,
            4.7,
            "Thick potato soup with cheese and avocado, made for cold weather.",
            "/images/locro-papa.jpg",
        ),
        destination(
            "Trucha al Ajillo de La Cocha",
            Gastronomy,
            1.083,
            -77.173,
            4.8,
            "Fresh lake trout prepared with garlic and aromatic herbs.",
            "/images/trucha-ajillo.jpg",
        ),
        destination(
            "Mote de Queso de Ipiales",
            Gastronomy,
            0.826,
            -77.639,
            4.5,
            "Hominy corn with cheese, served with the regional ají.",
            "/images/mote-queso.jpg",
        ),
    ]
}

/// Natural reserves, lakes and volcanoes.
pub fn nature() -> Vec<Waypoint> {
    use Category::Nature;
    vec![
        destination(
            "Laguna de La Cocha",
            Nature,
            1.090,
            -77.173,
            4.9,
            "Natural sanctuary ringed by Andean forest, home to birds and trout.",
            "/images/laguna-cocha.jpg",
        ),
        destination(
            "Reserva Natural Páramo de Bordoncillo",
            Nature,
            1.480,
            -77.310,
            4.7,
            "Páramo ecosystem of frailejones, lagoons and endemic species.",
            "/images/bordoncillo.jpg",
        ),
        destination(
            "Volcán Galeras",
            Nature,
            1.221,
            -77.358,
            4.8,
            "Protected area sheltering rich flora and fauna on a volcano's flanks.",
            "/images/volcan-galeras.jpg",
        ),
        destination(
            "Santuario de Flora y Fauna Azufral",
            Nature,
            1.080,
            -77.667,
            4.9,
            "Home of the striking green crater lake and Andean wildlife.",
            "/images/azufral.jpg",
        ),
        destination(
            "Bosque de los Arrayanes",
            Nature,
            1.312,
            -77.278,
            4.6,
            "A forest unique to the region, with cinnamon-barked trees.",
            "/images/arrayanes.jpg",
        ),
        destination(
            "Reserva Río Ñambi",
            Nature,
            1.285,
            -78.012,
            4.8,
            "Conservation area of lush biodiversity and rare species.",
            "/images/nambi.jpg",
        ),
    ]
}

/// Heritage sites, museums and festivals.
pub fn culture() -> Vec<Waypoint> {
    use Category::Culture;
    vec![
        destination(
            "Carnaval de Negros y Blancos",
            Culture,
            1.214,
            -77.278,
            5.0,
            "World Heritage carnival celebrated in Pasto every January.",
            "/images/carnaval.jpg",
        ),
        destination(
            "Iglesia de Las Lajas",
            Culture,
            0.806,
            -77.585,
            5.0,
            "Striking sanctuary built across a canyon near Ipiales.",
            "/images/las-lajas.jpg",
        ),
        destination(
            "Museo del Oro de Pasto",
            Culture,
            1.211,
            -77.283,
            4.7,
            "Archaeological collection of the region's pre-Columbian past.",
            "/images/museo-oro.jpg",
        ),
        destination(
            "Talleres de Barniz de Pasto",
            Culture,
            1.216,
            -77.281,
            4.8,
            "Workshops keeping the centuries-old mopa-mopa craft alive.",
            "/images/barniz-pasto.jpg",
        ),
        destination(
            "Centro Histórico de Túquerres",
            Culture,
            1.087,
            -77.619,
            4.6,
            "Colonial houses and churches preserving regional history.",
            "/images/tuquerres.jpg",
        ),
        destination(
            "Fiestas de San Pedro en La Unión",
            Culture,
            1.601,
            -77.125,
            4.5,
            "Cultural festival of music, dance and traditional food.",
            "/images/san-pedro.jpg",
        ),
    ]
}

/// The full catalog across all categories.
static ALL: Lazy<Vec<Waypoint>> = Lazy::new(|| {
    let mut all = gastronomy();
    all.extend(nature());
    all.extend(culture());
    all
});

/// All destinations across the three categories.
pub fn all() -> &'static [Waypoint] {
    &ALL
}

/// Look up a destination by name, case-insensitively. Underscores are
/// treated as spaces so URL slugs resolve directly.
pub fn find(name: &str) -> Option<Waypoint> {
    let wanted = name.replace('_', " ").trim().to_lowercase();
    all()
        .iter()
        .find(|w| w.name.to_lowercase() == wanted)
        .cloned()
}
