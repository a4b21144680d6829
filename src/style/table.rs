//! Build-time mapping from OSM tag values to style keys.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

/// Tag keys the renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Highway,
    Waterway,
    Natural,
    Landuse,
    Building,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Highway,
        Category::Waterway,
        Category::Natural,
        Category::Landuse,
        Category::Building,
    ];

    /// The OSM tag key of this category.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Highway => "highway",
            Category::Waterway => "waterway",
            Category::Natural => "natural",
            Category::Landuse => "landuse",
            Category::Building => "building",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|category| category.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// `(category, tag value, style key)`. Values are matched case-sensitively, some
/// extracts really do contain `building=Hotel` next to `building=hotel`.
pub static TAG_STYLES: &[(Category, &str, &str)] = &[
    // highway
    (Category::Highway, "motorway", "Motorway Style"),
    (Category::Highway, "trunk", "Trunk Style"),
    (Category::Highway, "primary", "Primary Style"),
    (Category::Highway, "secondary", "Secondary Style"),
    (Category::Highway, "tertiary", "Tertiary Style"),
    (Category::Highway, "unclassified", "Unclassified Style"),
    (Category::Highway, "residential", "Residential Style"),
    (Category::Highway, "motorway_link", "Motorway Link Style"),
    (Category::Highway, "trunk_link", "Trunk Link Style"),
    (Category::Highway, "primary_link", "Primary Link Style"),
    (Category::Highway, "secondary_link", "Secondary Link Style"),
    (Category::Highway, "tertiary_link", "Tertiary Link Style"),
    (Category::Highway, "living_street", "Street Style"),
    (Category::Highway, "service", "Service Style"),
    (Category::Highway, "pedestrian", "Pedestrian Style"),
    (Category::Highway, "track", "Track Style"),
    (Category::Highway, "bus_guideway", "Bus Guideway Style"),
    (Category::Highway, "escape", "Escape Style"),
    (Category::Highway, "raceway", "Raceway Style"),
    (Category::Highway, "road", "Road Style"),
    (Category::Highway, "footway", "Footway Style"),
    (Category::Highway, "bridleway", "Bridleway Style"),
    (Category::Highway, "steps", "Steps Style"),
    (Category::Highway, "corridor", "Corridor Style"),
    (Category::Highway, "path", "Path Style"),
    (Category::Highway, "cycleway", "Cycleway Style"),
    (Category::Highway, "proposed", "Proposed Style"),
    (Category::Highway, "construction", "Construction Style"),
    (Category::Highway, "bus_stop", "Bus Stop Style"),
    (Category::Highway, "crossing", "Crossing Style"),
    (Category::Highway, "elevator", "Elevator Style"),
    (Category::Highway, "emergency_access_point", "Emergency Access Point Style"),
    (Category::Highway, "give_way", "Give Way Style"),
    (Category::Highway, "milestone", "Milestone Style"),
    (Category::Highway, "mini_roundabout", "Mini Roundabout Style"),
    (Category::Highway, "motorway_junction", "Motorway Junction Style"),
    (Category::Highway, "passing_place", "Passing Place Style"),
    (Category::Highway, "platform", "Platform Style"),
    (Category::Highway, "rest_area", "Rest Area Style"),
    (Category::Highway, "speed_camera", "Speed Camera Style"),
    (Category::Highway, "street_lamp", "Street Lamp Style"),
    (Category::Highway, "services", "Services Style"),
    (Category::Highway, "stop", "Stop Style"),
    (Category::Highway, "traffic_mirror", "Traffic Mirror Style"),
    (Category::Highway, "traffic_signals", "Traffic Signals Style"),
    (Category::Highway, "trailhead", "Trailhead Style"),
    (Category::Highway, "turning_circle", "Turning Circle Style"),
    (Category::Highway, "turning_loop", "Turning Loop Style"),
    (Category::Highway, "toll_gantry", "Toll Gantry Style"),

    // waterway
    (Category::Waterway, "river", "River Style"),
    (Category::Waterway, "riverbank", "Riverbank Style"),
    (Category::Waterway, "stream", "Stream Style"),
    (Category::Waterway, "tidal_channel", "Tidal Channel Style"),
    (Category::Waterway, "canal", "Canal Style"),
    (Category::Waterway, "pressurised", "Pressurized Style"),
    (Category::Waterway, "drain", "Drain Style"),
    (Category::Waterway, "ditch", "Ditch Style"),
    (Category::Waterway, "fairway", "Fairway Style"),
    (Category::Waterway, "artificial", "Artificial Style"),
    (Category::Waterway, "derelict_canal", "Derelict Canal Style"),
    (Category::Waterway, "dock", "Dock Style"),
    (Category::Waterway, "boatyard", "Boatyard Style"),
    (Category::Waterway, "dam", "Dam Style"),
    (Category::Waterway, "weir", "Weir Style"),
    (Category::Waterway, "fuel", "Fuel Style"),
    (Category::Waterway, "lock_gate", "Lock Gate Style"),

    // natural
    (Category::Natural, "wood", "Wood Style"),
    (Category::Natural, "tree_row", "Tree Row Style"),
    (Category::Natural, "tree", "Tree Style"),
    (Category::Natural, "scrub", "Scrub Style"),
    (Category::Natural, "heath", "Heath Style"),
    (Category::Natural, "moor", "Moor Style"),
    (Category::Natural, "grass", "Grass Style"),
    (Category::Natural, "grassland", "Grassland Style"),
    (Category::Natural, "fell", "Fell Style"),
    (Category::Natural, "bare_rock", "Bare Rock"),
    (Category::Natural, "scree", "Scree Style"),
    (Category::Natural, "shingle", "Shingle Style"),
    (Category::Natural, "sand", "Sand Style"),
    (Category::Natural, "mud", "Mud Style"),
    (Category::Natural, "water", "Water Style"),
    (Category::Natural, "wetland", "Wetland"),
    (Category::Natural, "glacier", "Glacier Style"),
    (Category::Natural, "bay", "Bay Style"),
    (Category::Natural, "cape", "Cape Style"),
    (Category::Natural, "strait", "Strait Style"),
    (Category::Natural, "beach", "Beach Style"),
    (Category::Natural, "coastline", "Coastline Style"),
    (Category::Natural, "reef", "Reef Style"),
    (Category::Natural, "spring", "Spring Style"),
    (Category::Natural, "hot_spring", "Hot Spring Style"),
    (Category::Natural, "geyser", "Geyser Style"),
    (Category::Natural, "mountain_range", "Mountain Range Style"),
    (Category::Natural, "peak", "Peak Style"),
    (Category::Natural, "dune", "Dune Style"),
    (Category::Natural, "hill", "Hill Style"),
    (Category::Natural, "volcano", "Volcano Style"),
    (Category::Natural, "valley", "Valley Style"),
    (Category::Natural, "ridge", "Ridge Style"),
    (Category::Natural, "arete", "Arete Style"),
    (Category::Natural, "cliff", "Cliff Style"),
    (Category::Natural, "saddle", "Saddle Style"),
    (Category::Natural, "isthmus", "Isthmus Style"),
    (Category::Natural, "peninsula", "Peninsula Style"),
    (Category::Natural, "rock", "Rock Style"),
    (Category::Natural, "stone", "Stone Style"),
    (Category::Natural, "sinkhole", "Sinkhole Style"),
    (Category::Natural, "cave_entrance", "Cave Entrance Style"),

    // landuse
    (Category::Landuse, "commercial", "Commercial Style"),
    (Category::Landuse, "construction", "Construction Land Use Style"),
    (Category::Landuse, "industrial", "Industrial Style"),
    (Category::Landuse, "residential", "Residential Land Use Style"),
    (Category::Landuse, "retail", "Retail Style"),
    (Category::Landuse, "allotments", "Allotments Style"),
    (Category::Landuse, "farmland", "Farmland Style"),
    (Category::Landuse, "farm", "Farm Style"),
    (Category::Landuse, "farmyard", "Farmyard Style"),
    (Category::Landuse, "forest", "Forest Style"),
    (Category::Landuse, "meadow", "Meadow Style"),
    (Category::Landuse, "orchard", "Orchard Style"),
    (Category::Landuse, "vineyard", "Vineyard Style"),
    (Category::Landuse, "Garden", "Garden Style"),
    (Category::Landuse, "basin", "Basin Style"),
    (Category::Landuse, "brownfield", "Brownfield Style"),
    (Category::Landuse, "cemetery", "Cemetery Style"),
    (Category::Landuse, "conservation", "Conservation Style"),
    (Category::Landuse, "depot", "Depot Style"),
    (Category::Landuse, "garage", "Garages Style"),
    (Category::Landuse, "garages", "Garages Style"),
    (Category::Landuse, "traffic_island", "Traffic Island Style"),
    (Category::Landuse, "grass", "Grass Land Use Style"),
    (Category::Landuse, "greenfield", "Greenfield Style"),
    (Category::Landuse, "greenhouse_horticulture", "Greenhouse Horticulture Style"),
    (Category::Landuse, "landfill", "Landfill Style"),
    (Category::Landuse, "military", "Military Style"),
    (Category::Landuse, "peat_cutting", "Peat_cutting Style"),
    (Category::Landuse, "plant_nursery", "Plant Nursery Style"),
    (Category::Landuse, "port", "Port Style"),
    (Category::Landuse, "quarry", "Quarry Style"),
    (Category::Landuse, "railway", "Railway Style"),
    (Category::Landuse, "recreation_ground", "Recreation Ground Style"),
    (Category::Landuse, "religious", "Religious Style"),
    (Category::Landuse, "churchyard", "Churchyard Style"),
    (Category::Landuse, "reservoir", "Reservoir Style"),
    (Category::Landuse, "reservoir_watershed", "Reservoir Watershed Style"),
    (Category::Landuse, "salt_pond", "Salt_pond Style"),
    (Category::Landuse, "village_green", "Village Green Style"),
    (Category::Landuse, "vacant", "Vacant Style"),
    (Category::Landuse, "yes", "Yes Land Use Style"),
    (Category::Landuse, "government", "Government Land Use Style"),

    // building
    (Category::Building, "apartments", "Apartments Style"),
    (Category::Building, "indoor", "Indoor Style"),
    (Category::Building, "condominium", "Condominium Style"),
    (Category::Building, "Condominium", "(C)ondominium Style"),
    (Category::Building, "tower", "Tower Style"),
    (Category::Building, "amphitheatre", "Amphitheatre Style"),
    (Category::Building, "bungalow", "Bungalow Style"),
    (Category::Building, "cabin", "Cabin Style"),
    (Category::Building, "detached", "Detached Style"),
    (Category::Building, "dormitory", "Dormitory Style"),
    (Category::Building, "farm", "Farm (Building) Style"),
    (Category::Building, "ger", "Ger Style"),
    (Category::Building, "hotel", "Hotel Style"),
    (Category::Building, "house", "House Style"),
    (Category::Building, "houseboat", "Houseboat Style"),
    (Category::Building, "residential", "Residential (Building) Style"),
    (Category::Building, "semidetached_house", "Semidetached House Style"),
    (Category::Building, "static_caravan", "Static Caravan Style"),
    (Category::Building, "terrace", "Terrace Style"),
    (Category::Building, "commercial", "Commercial (Building) Style"),
    (Category::Building, "industrial", "Industrial (Building) Style"),
    (Category::Building, "manufacture", "Manufacture Style"),
    (Category::Building, "kiosk", "Kiosk Style"),
    (Category::Building, "office", "Office Style"),
    (Category::Building, "retail", "Retail (Building) Style"),
    (Category::Building, "shop", "Shop Style"),
    (Category::Building, "supermarket", "Supermarket Style"),
    (Category::Building, "warehouse", "Warehouse Style"),
    (Category::Building, "cathedral", "Cathedral Style"),
    (Category::Building, "chapel", "Chapel Style"),
    (Category::Building, "church", "Church Style"),
    (Category::Building, "mosque", "Mosque Style"),
    (Category::Building, "religious", "Religious (Building) Style"),
    (Category::Building, "shrine", "Shrine Style"),
    (Category::Building, "synagogue", "Synagogue Style"),
    (Category::Building, "temple", "Temple Style"),
    (Category::Building, "bakehouse", "Bakehouse Style"),
    (Category::Building, "civic", "Civic Style"),
    (Category::Building, "Gym", "Gym Style"),
    (Category::Building, "canopy", "Canopy Style"),
    (Category::Building, "shelter", "Shelter Style"),
    (Category::Building, "burial_vault", "Burial Vault Style"),
    (Category::Building, "part", "Part Style"),
    (Category::Building, "college", "College Style"),
    (Category::Building, "health", "Health_Style"),
    (Category::Building, "Hotel", "(H)otel Style"),
    (Category::Building, "multipurpose", "Multipurpose Style"),
    (Category::Building, "fire_station", "Fire Station Style"),
    (Category::Building, "government", "Government Style"),
    (Category::Building, "governement", "Governement Style"),
    (Category::Building, "subway_entrance", "Subway Entrance Style"),
    (Category::Building, "library", "Library Style"),
    (Category::Building, "hospital", "Hospital Style"),
    (Category::Building, "kindergarten", "Kindergarten Style"),
    (Category::Building, "public", "Public Style"),
    (Category::Building, "school", "School Style"),
    (Category::Building, "toilets", "Toilets Style"),
    (Category::Building, "train_station", "Train Station Style"),
    (Category::Building, "transportation", "Transportation Style"),
    (Category::Building, "university", "University Style"),
    (Category::Building, "barn", "Barn Style"),
    (Category::Building, "conservatory", "Conservatory Style"),
    (Category::Building, "cowshed", "Cowshed Style"),
    (Category::Building, "farm_auxiliary", "Farm Auxiliary Style"),
    (Category::Building, "greenhouse", "Greenhouse Style"),
    (Category::Building, "slurry_tank", "Slurry Tank Style"),
    (Category::Building, "stable", "Stable Style"),
    (Category::Building, "sty", "Sty Style"),
    (Category::Building, "grandstand", "Grandstand Style"),
    (Category::Building, "pavilion", "Pavilion Style"),
    (Category::Building, "riding_hall", "Riding Hall Style"),
    (Category::Building, "sports_hall", "Sports_ Hall Style"),
    (Category::Building, "stadium", "Stadium Style"),
    (Category::Building, "hangar", "Hangar Style"),
    (Category::Building, "hut", "Hut Style"),
    (Category::Building, "shed", "Shed Style"),
    (Category::Building, "carport", "Carport Style"),
    (Category::Building, "garage", "Garage Style"),
    (Category::Building, "garages", "Garages (Building) Style"),
    (Category::Building, "parking", "Parking Style"),
    (Category::Building, "digester", "Digester Style"),
    (Category::Building, "service", "Service (Building) Style"),
    (Category::Building, "transformer_tower", "Transformer Tower Style"),
    (Category::Building, "water_tower", "Water Tower Style"),
    (Category::Building, "bunker", "Bunker Style"),
    (Category::Building, "bridge", "Bridge Style"),
    (Category::Building, "construction", "Construction (Building) Style"),
    (Category::Building, "gatehouse", "Gatehouse Style"),
    (Category::Building, "roof", "Roof Style"),
    (Category::Building, "ruins", "Ruins Style"),
    (Category::Building, "tree_house", "Tree House Style"),
    (Category::Building, "yes", "Yes Style"),
    (Category::Building, "no", "No Style"),
    (Category::Building, "undefined", "Undefined Style"),
];

static INDEX: LazyLock<HashMap<(Category, &'static str), &'static str>> = LazyLock::new(|| {
    TAG_STYLES
        .iter()
        .map(|&(category, value, style_key)| ((category, value), style_key))
        .collect()
});

/// Style key for a tag value, if the value is known for that category.
pub fn style_key(category: Category, value: &str) -> Option<&'static str> {
    INDEX.get(&(category, value)).copied()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn each_pair_maps_to_one_key() {
        let mut seen = HashSet::new();
        for (category, value, _) in TAG_STYLES {
            assert!(seen.insert((category, value)), "{category}={value} listed twice");
        }
    }

    #[test]
    fn same_value_can_differ_per_category() {
        assert_eq!(style_key(Category::Highway, "residential"), Some("Residential Style"));
        assert_eq!(style_key(Category::Landuse, "residential"), Some("Residential Land Use Style"));
        assert_eq!(
            style_key(Category::Building, "residential"),
            Some("Residential (Building) Style")
        );
    }

    #[test]
    fn unknown_values_have_no_key() {
        assert_eq!(style_key(Category::Highway, "some_unknown_value"), None);
        assert_eq!(style_key(Category::Building, "HOUSE"), None);
    }

    #[test]
    fn categories_round_trip_through_their_key() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
        assert_eq!(Category::from_key("amenity"), None);
    }
}
