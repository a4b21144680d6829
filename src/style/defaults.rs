//! First-run style configuration.

use std::collections::BTreeMap;

use super::entry::{CapStyle, Color, DashPattern, FillEntry, JoinStyle, StrokeEntry, StyleEntry};

/// Style key holding the canvas background color.
pub const BACKGROUND_COLOR: &str = "Background Color";

enum DefaultStyle {
    Fill(Color),
    Stroke(Color, f32, DashPattern),
}

const fn fill(r: u8, g: u8, b: u8) -> DefaultStyle {
    DefaultStyle::Fill(Color::rgb(r, g, b))
}

const fn stroke(r: u8, g: u8, b: u8, width: f32, dash: DashPattern) -> DefaultStyle {
    DefaultStyle::Stroke(Color::rgb(r, g, b), width, dash)
}

static DEFAULT_STYLES: &[(&str, DefaultStyle)] = &[
    ("Background Color", fill(20, 20, 20)),
    ("Motorway Style", stroke(255, 255, 50, 10.0, DashPattern::Solid)),
    ("Trunk Style", stroke(255, 100, 50, 10.0, DashPattern::Solid)),
    ("Primary Style", stroke(255, 150, 50, 5.0, DashPattern::Solid)),
    ("Secondary Style", stroke(255, 255, 100, 5.0, DashPattern::Solid)),
    ("Tertiary Style", stroke(255, 255, 255, 5.0, DashPattern::Solid)),
    ("Unclassified Style", stroke(255, 255, 255, 3.0, DashPattern::Solid)),
    ("Residential Style", stroke(255, 255, 255, 3.0, DashPattern::Solid)),
    ("Motorway Link Style", stroke(255, 50, 50, 3.0, DashPattern::Solid)),
    ("Trunk Link Style", stroke(255, 100, 50, 3.0, DashPattern::Solid)),
    ("Primary Link Style", stroke(255, 150, 50, 3.0, DashPattern::Solid)),
    ("Secondary Link Style", stroke(255, 255, 100, 3.0, DashPattern::Solid)),
    ("Tertiary Link Style", stroke(255, 255, 255, 3.0, DashPattern::Solid)),
    ("Street Style", stroke(200, 200, 200, 3.0, DashPattern::Solid)),
    ("Service Style", stroke(255, 255, 255, 2.0, DashPattern::Solid)),
    ("Pedestrian Style", stroke(150, 150, 150, 3.0, DashPattern::Solid)),
    ("Track Style", stroke(155, 113, 30, 1.0, DashPattern::DashDot)),
    ("Bus Guideway Style", stroke(100, 100, 255, 1.0, DashPattern::Dash)),
    ("Escape Style", stroke(255, 255, 255, 2.0, DashPattern::Solid)),
    ("Raceway Style", stroke(255, 192, 202, 2.0, DashPattern::Solid)),
    ("Road Style", stroke(125, 125, 125, 2.0, DashPattern::Solid)),
    ("Footway Style", stroke(247, 218, 218, 1.0, DashPattern::Dot)),
    ("Bridleway Style", stroke(13, 134, 13, 1.0, DashPattern::Dash)),
    ("Steps Style", stroke(249, 104, 92, 1.0, DashPattern::Dash)),
    ("Corridor Style", stroke(255, 255, 255, 1.0, DashPattern::Solid)),
    ("Path Style", stroke(247, 218, 218, 1.0, DashPattern::Dot)),
    ("Cycleway Style", stroke(49, 49, 253, 1.0, DashPattern::Dot)),
    ("Proposed Style", stroke(255, 255, 255, 1.0, DashPattern::Solid)),
    ("Construction Style", stroke(100, 100, 200, 1.0, DashPattern::Dash)),
    ("Bus Stop Style", stroke(255, 0, 0, 1.0, DashPattern::Solid)),
    ("Crossing Style", stroke(55, 184, 33, 1.0, DashPattern::Solid)),
    ("Elevator Style", stroke(31, 170, 186, 1.0, DashPattern::Solid)),
    ("Emergency Access Point Style", stroke(255, 0, 0, 1.0, DashPattern::Solid)),
    ("Give Way Style", stroke(255, 255, 50, 1.0, DashPattern::Solid)),
    ("Milestone Style", stroke(0, 185, 255, 1.0, DashPattern::Solid)),
    ("Mini Roundabout Style", stroke(205, 128, 50, 1.0, DashPattern::Solid)),
    ("Motorway Junction Style", stroke(255, 255, 50, 1.0, DashPattern::Solid)),
    ("Passing Place Style", stroke(255, 255, 50, 1.0, DashPattern::Solid)),
    ("Platform Style", stroke(205, 128, 50, 1.0, DashPattern::Solid)),
    ("Rest Area Style", stroke(80, 80, 255, 1.0, DashPattern::Solid)),
    ("Speed Camera Style", stroke(255, 0, 0, 1.0, DashPattern::Solid)),
    ("Street Lamp Style", stroke(255, 255, 50, 1.0, DashPattern::Solid)),
    ("Services Style", stroke(80, 80, 255, 1.0, DashPattern::Solid)),
    ("Stop Style", stroke(255, 0, 0, 1.0, DashPattern::Solid)),
    ("Traffic Mirror Style", stroke(255, 255, 50, 1.0, DashPattern::Solid)),
    ("Traffic Signals Style", stroke(255, 255, 50, 1.0, DashPattern::Solid)),
    ("Trailhead Style", stroke(205, 128, 50, 1.0, DashPattern::Solid)),
    ("Turning Circle Style", stroke(205, 128, 50, 1.0, DashPattern::Solid)),
    ("Turning Loop Style", stroke(205, 128, 50, 1.0, DashPattern::Solid)),
    ("Toll Gantry Style", stroke(80, 80, 255, 1.0, DashPattern::Solid)),
    ("River Style", stroke(170, 211, 223, 5.0, DashPattern::Solid)),
    ("Riverbank Style", fill(170, 211, 223)),
    ("Stream Style", stroke(170, 211, 223, 5.0, DashPattern::Solid)),
    ("Tidal Channel Style", stroke(255, 255, 255, 1.0, DashPattern::Solid)),
    ("Canal Style", stroke(170, 211, 223, 3.0, DashPattern::Solid)),
    ("Pressurized Style", stroke(255, 255, 255, 1.0, DashPattern::Solid)),
    ("Drain Style", stroke(170, 211, 223, 2.0, DashPattern::Solid)),
    ("Ditch Style", stroke(170, 211, 223, 2.0, DashPattern::Solid)),
    ("Fairway Style", stroke(255, 255, 255, 1.0, DashPattern::Solid)),
    ("Artificial Style", stroke(170, 211, 223, 2.0, DashPattern::Solid)),
    ("Derelict Canal Style", stroke(170, 211, 223, 2.0, DashPattern::Solid)),
    ("Dock Style", fill(170, 211, 223)),
    ("Boatyard Style", fill(170, 211, 223)),
    ("Dam Style", stroke(170, 211, 223, 2.0, DashPattern::Solid)),
    ("Weir Style", stroke(170, 211, 223, 2.0, DashPattern::Solid)),
    ("Fuel Style", fill(170, 211, 223)),
    ("Lock Gate Style", stroke(170, 211, 223, 2.0, DashPattern::Solid)),
    ("Wood Style", fill(157, 202, 138)),
    ("Tree Row Style", stroke(157, 202, 138, 2.0, DashPattern::Solid)),
    ("Tree Style", stroke(157, 202, 138, 2.0, DashPattern::Solid)),
    ("Scrub Style", fill(200, 215, 171)),
    ("Heath Style", fill(214, 217, 159)),
    ("Moor Style", fill(211, 210, 165)),
    ("Grass Style", fill(205, 235, 176)),
    ("Grassland Style", fill(205, 235, 176)),
    ("Fell Style", fill(174, 222, 126)),
    ("Bare Rock", fill(213, 209, 204)),
    ("Scree Style", fill(237, 228, 220)),
    ("Shingle Style", fill(231, 223, 216)),
    ("Sand Style", fill(238, 226, 192)),
    ("Mud Style", fill(227, 219, 211)),
    ("Water Style", fill(166, 198, 198)),
    ("Wetland", fill(27, 139, 97)),
    ("Glacier Style", fill(221, 236, 236)),
    ("Bay Style", fill(166, 198, 198)),
    ("Cape Style", stroke(166, 198, 198, 2.0, DashPattern::Solid)),
    ("Strait Style", fill(166, 198, 198)),
    ("Beach Style", fill(255, 241, 186)),
    ("Coastline Style", stroke(237, 234, 226, 1.0, DashPattern::Solid)),
    ("Reef Style", fill(202, 193, 170)),
    ("Spring Style", stroke(166, 198, 198, 2.0, DashPattern::Solid)),
    ("Hot Spring Style", stroke(203, 172, 169, 2.0, DashPattern::Solid)),
    ("Geyser Style", stroke(166, 198, 198, 2.0, DashPattern::Solid)),
    ("Mountain Range Style", stroke(208, 143, 85, 2.0, DashPattern::Solid)),
    ("Peak Style", stroke(208, 143, 85, 2.0, DashPattern::Solid)),
    ("Dune Style", fill(255, 241, 186)),
    ("Hill Style", stroke(205, 235, 176, 2.0, DashPattern::Solid)),
    ("Volcano Style", stroke(212, 0, 0, 2.0, DashPattern::Solid)),
    ("Valley Style", stroke(63, 150, 100, 2.0, DashPattern::Solid)),
    ("Ridge Style", stroke(208, 143, 85, 2.0, DashPattern::Solid)),
    ("Arete Style", stroke(208, 143, 85, 2.0, DashPattern::Solid)),
    ("Cliff Style", stroke(208, 143, 85, 2.0, DashPattern::Solid)),
    ("Saddle Style", stroke(208, 143, 85, 2.0, DashPattern::Solid)),
    ("Isthmus Style", fill(255, 241, 186)),
    ("Peninsula Style", fill(37, 175, 106)),
    ("Rock Style", fill(208, 143, 85)),
    ("Stone Style", stroke(223, 208, 191, 2.0, DashPattern::Solid)),
    ("Sinkhole Style", fill(255, 241, 186)),
    ("Cave Entrance Style", stroke(30, 30, 30, 2.0, DashPattern::Solid)),
    ("Commercial Style", fill(238, 207, 207)),
    ("Construction Land Use Style", fill(199, 199, 180)),
    ("Industrial Style", fill(230, 209, 227)),
    ("Residential Land Use Style", fill(218, 218, 218)),
    ("Retail Style", fill(254, 202, 197)),
    ("Allotments Style", fill(201, 225, 191)),
    ("Farmland Style", fill(238, 240, 213)),
    ("Farm Style", fill(238, 240, 213)),
    ("Farmyard Style", fill(234, 204, 164)),
    ("Forest Style", fill(157, 202, 138)),
    ("Meadow Style", fill(205, 235, 176)),
    ("Orchard Style", fill(158, 220, 144)),
    ("Vineyard Style", fill(158, 220, 144)),
    ("Garden Style", fill(158, 220, 144)),
    ("Basin Style", fill(170, 211, 223)),
    ("Brownfield Style", fill(167, 168, 126)),
    ("Cemetery Style", fill(170, 203, 175)),
    ("Conservation Style", fill(197, 236, 148)),
    ("Depot Style", fill(214, 214, 193)),
    ("Garages Style", fill(214, 214, 193)),
    ("Traffic Island Style", fill(230, 209, 227)),
    ("Grass Land Use Style", fill(197, 236, 148)),
    ("Greenfield Style", fill(241, 238, 232)),
    ("Greenhouse Horticulture Style", fill(238, 240, 213)),
    ("Landfill Style", fill(167, 168, 126)),
    ("Military Style", fill(243, 228, 222)),
    ("Peat_cutting Style", fill(181, 229, 170)),
    ("Plant Nursery Style", fill(181, 229, 170)),
    ("Port Style", fill(166, 198, 198)),
    ("Quarry Style", fill(183, 181, 181)),
    ("Railway Style", fill(230, 209, 227)),
    ("Recreation Ground Style", fill(223, 252, 226)),
    ("Religious Style", fill(205, 204, 201)),
    ("Churchyard Style", fill(205, 204, 201)),
    ("Reservoir Style", fill(170, 211, 223)),
    ("Reservoir Watershed Style", fill(129, 189, 207)),
    ("Salt_pond Style", fill(170, 211, 223)),
    ("Village Green Style", fill(205, 235, 176)),
    ("Vacant Style", fill(200, 200, 200)),
    ("Yes Land Use Style", fill(200, 200, 200)),
    ("Government Land Use Style", fill(200, 200, 200)),
    ("Apartments Style", fill(140, 140, 140)),
    ("Indoor Style", fill(140, 140, 140)),
    ("Condominium Style", fill(140, 140, 140)),
    ("(C)ondominium Style", fill(140, 140, 140)),
    ("Tower Style", fill(140, 140, 140)),
    ("Amphitheatre Style", fill(140, 140, 140)),
    ("Bungalow Style", fill(140, 140, 140)),
    ("Cabin Style", fill(140, 140, 140)),
    ("Detached Style", fill(140, 140, 140)),
    ("Dormitory Style", fill(140, 140, 140)),
    ("Farm (Building) Style", fill(140, 140, 140)),
    ("Ger Style", fill(140, 140, 140)),
    ("Hotel Style", fill(140, 140, 140)),
    ("House Style", fill(140, 140, 140)),
    ("Houseboat Style", fill(140, 140, 140)),
    ("Residential (Building) Style", fill(140, 140, 140)),
    ("Semidetached House Style", fill(140, 140, 140)),
    ("Static Caravan Style", fill(140, 140, 140)),
    ("Terrace Style", fill(140, 140, 140)),
    ("Commercial (Building) Style", fill(140, 140, 140)),
    ("Industrial (Building) Style", fill(140, 140, 140)),
    ("Manufacture Style", fill(140, 140, 140)),
    ("Kiosk Style", fill(140, 140, 140)),
    ("Office Style", fill(140, 140, 140)),
    ("Retail (Building) Style", fill(140, 140, 140)),
    ("Shop Style", fill(140, 140, 140)),
    ("Supermarket Style", fill(140, 140, 140)),
    ("Warehouse Style", fill(140, 140, 140)),
    ("Cathedral Style", fill(140, 140, 140)),
    ("Chapel Style", fill(140, 140, 140)),
    ("Church Style", fill(140, 140, 140)),
    ("Mosque Style", fill(140, 140, 140)),
    ("Religious (Building) Style", fill(140, 140, 140)),
    ("Shrine Style", fill(140, 140, 140)),
    ("Synagogue Style", fill(140, 140, 140)),
    ("Temple Style", fill(140, 140, 140)),
    ("Bakehouse Style", fill(140, 140, 140)),
    ("Civic Style", fill(140, 140, 140)),
    ("Gym Style", fill(140, 140, 140)),
    ("Canopy Style", fill(140, 140, 140)),
    ("Shelter Style", fill(140, 140, 140)),
    ("Burial Vault Style", fill(140, 140, 140)),
    ("Part Style", fill(140, 140, 140)),
    ("College Style", fill(140, 140, 140)),
    ("Health_Style", fill(140, 140, 140)),
    ("(H)otel Style", fill(140, 140, 140)),
    ("Multipurpose Style", fill(140, 140, 140)),
    ("Fire Station Style", fill(140, 140, 140)),
    ("Government Style", fill(140, 140, 140)),
    ("Governement Style", fill(140, 140, 140)),
    ("Subway Entrance Style", fill(140, 140, 140)),
    ("Library Style", fill(140, 140, 140)),
    ("Hospital Style", fill(140, 140, 140)),
    ("Kindergarten Style", fill(140, 140, 140)),
    ("Public Style", fill(140, 140, 140)),
    ("School Style", fill(140, 140, 140)),
    ("Toilets Style", fill(140, 140, 140)),
    ("Train Station Style", fill(140, 140, 140)),
    ("Transportation Style", fill(140, 140, 140)),
    ("University Style", fill(140, 140, 140)),
    ("Barn Style", fill(140, 140, 140)),
    ("Conservatory Style", fill(140, 140, 140)),
    ("Cowshed Style", fill(140, 140, 140)),
    ("Farm Auxiliary Style", fill(140, 140, 140)),
    ("Greenhouse Style", fill(140, 140, 140)),
    ("Slurry Tank Style", fill(140, 140, 140)),
    ("Stable Style", fill(140, 140, 140)),
    ("Sty Style", fill(140, 140, 140)),
    ("Grandstand Style", fill(140, 140, 140)),
    ("Pavilion Style", fill(140, 140, 140)),
    ("Riding Hall Style", fill(140, 140, 140)),
    ("Sports_ Hall Style", fill(140, 140, 140)),
    ("Stadium Style", fill(140, 140, 140)),
    ("Hangar Style", fill(140, 140, 140)),
    ("Hut Style", fill(140, 140, 140)),
    ("Shed Style", fill(140, 140, 140)),
    ("Carport Style", fill(140, 140, 140)),
    ("Garage Style", fill(140, 140, 140)),
    ("Garages (Building) Style", fill(140, 140, 140)),
    ("Parking Style", fill(140, 140, 140)),
    ("Digester Style", fill(140, 140, 140)),
    ("Service (Building) Style", fill(140, 140, 140)),
    ("Transformer Tower Style", fill(140, 140, 140)),
    ("Water Tower Style", fill(140, 140, 140)),
    ("Bunker Style", fill(140, 140, 140)),
    ("Bridge Style", fill(140, 140, 140)),
    ("Construction (Building) Style", fill(140, 140, 140)),
    ("Gatehouse Style", fill(140, 140, 140)),
    ("Roof Style", fill(140, 140, 140)),
    ("Ruins Style", fill(140, 140, 140)),
    ("Tree House Style", fill(140, 140, 140)),
    ("Yes Style", fill(140, 140, 140)),
    ("No Style", fill(140, 140, 140)),
    ("Undefined Style", fill(140, 140, 140)),
];

/// Every known style key with its default entry, all enabled.
pub fn default_styles() -> BTreeMap<String, StyleEntry> {
    DEFAULT_STYLES
        .iter()
        .map(|(key, style)| {
            let entry = match *style {
                DefaultStyle::Fill(color) => StyleEntry::Fill(FillEntry {
                    color,
                    enabled: true,
                }),
                DefaultStyle::Stroke(color, width, dash) => StyleEntry::Stroke(StrokeEntry {
                    color,
                    width,
                    dash,
                    cap: CapStyle::Round,
                    join: JoinStyle::Round,
                    enabled: true,
                }),
            };
            (key.to_string(), entry)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::table::TAG_STYLES;

    #[test]
    fn every_table_key_has_a_default() {
        let defaults = default_styles();
        for (category, value, key) in TAG_STYLES {
            assert!(defaults.contains_key(*key), "{category}={value} -> '{key}' has no default");
        }
        assert!(defaults.contains_key(BACKGROUND_COLOR));
    }

    #[test]
    fn buildings_are_filled_and_roads_stroked() {
        let defaults = default_styles();
        assert_eq!(
            defaults["House Style"],
            StyleEntry::Fill(FillEntry {
                color: Color::rgb(140, 140, 140),
                enabled: true
            })
        );
        assert!(matches!(
            defaults["Motorway Style"],
            StyleEntry::Stroke(StrokeEntry { width, .. }) if width == 10.0
        ));
    }
}
