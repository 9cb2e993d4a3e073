//! The six dashboard resources.

use super::types::*;

pub const PHONE_PATTERN: &str = r"^[+]?[\d\s\-().]{10,20}$";

pub static ALERTS: ResourceDef = ResourceDef {
    name: "alerts",
    path: "/alerts",
    table: "alerts",
    label: "Alert",
    columns: &[
        ColumnDef::primary_key(),
        ColumnDef::text("type", "Type"),
        ColumnDef::text("location", "Location"),
        ColumnDef::text("severity", "Severity").one_of(
            &["critical", "warning", "advisory"],
            "INVALID_SEVERITY",
            "Severity must be one of: critical, warning, advisory",
        ),
        ColumnDef::text("description", "Description"),
        ColumnDef::timestamp("timestamp", false),
        ColumnDef::boolean("is_active", "isActive")
            .with_default("1")
            .update_only()
            .invalid("INVALID_IS_ACTIVE", "isActive must be a boolean"),
    ],
    required_style: RequiredStyle::AllAtOnce("Type, location, severity, and description are required"),
    list: Some(ListSpec {
        filters: &[
            FilterDef { param: "severity", columns: &["severity"], op: FilterOp::Eq },
            FilterDef { param: "location", columns: &["location"], op: FilterOp::Contains },
        ],
        scope: Some(("is_active", true)),
        sort: SortSpec::Fixed { column: "timestamp", descending: true },
    }),
    delete: DeleteMode::Soft("is_active"),
    require_update_fields: false,
};

pub static EMERGENCY_CONTACTS: ResourceDef = ResourceDef {
    name: "contacts",
    path: "/emergency-contacts",
    table: "emergency_contacts",
    label: "Emergency contact",
    columns: &[
        ColumnDef::primary_key(),
        ColumnDef::text("category", "Category"),
        ColumnDef::text("name", "Name"),
        ColumnDef::text("number", "Number").pattern(PHONE_PATTERN, "INVALID_PHONE_NUMBER", "Invalid phone number format"),
        ColumnDef::text("icon_name", "Icon name"),
    ],
    required_style: RequiredStyle::EachField,
    list: Some(ListSpec {
        filters: &[
            FilterDef { param: "category", columns: &["category"], op: FilterOp::Eq },
            FilterDef { param: "search", columns: &["name", "category", "number"], op: FilterOp::Contains },
        ],
        scope: None,
        sort: SortSpec::Selectable { allowed: &["name", "category", "number"], default: "name" },
    }),
    delete: DeleteMode::Hard,
    require_update_fields: false,
};

pub static SHELTERS: ResourceDef = ResourceDef {
    name: "shelters",
    path: "/resources/shelters",
    table: "shelters",
    label: "Shelter",
    columns: &[
        ColumnDef::primary_key(),
        ColumnDef::text("name", "Name"),
        ColumnDef::text("address", "Address"),
        ColumnDef::real("latitude", "Latitude").range(
            Some(-90.0),
            Some(90.0),
            "INVALID_LATITUDE",
            "Latitude must be a number between -90 and 90",
        ),
        ColumnDef::real("longitude", "Longitude").range(
            Some(-180.0),
            Some(180.0),
            "INVALID_LONGITUDE",
            "Longitude must be a number between -180 and 180",
        ),
        ColumnDef::integer("capacity", "Capacity").range(Some(0.0), None, "INVALID_CAPACITY", "Capacity must be a number >= 0"),
        ColumnDef::integer("available", "Available").range(Some(0.0), None, "INVALID_AVAILABLE", "Available must be a number >= 0"),
        ColumnDef::text_list("amenities", "Amenities").invalid("INVALID_AMENITIES", "Amenities must be a list of strings"),
        ColumnDef::text("contact", "Contact"),
        ColumnDef::text("status", "Status").one_of(
            &["open", "limited", "closed"],
            "INVALID_STATUS",
            "Status must be one of: open, limited, closed",
        ),
        ColumnDef::text("distance", "Distance").optional(),
    ],
    required_style: RequiredStyle::AllAtOnce(
        "Name, address, latitude, longitude, capacity, available, amenities, contact, and status are required",
    ),
    list: Some(ListSpec {
        filters: &[
            FilterDef { param: "status", columns: &["status"], op: FilterOp::Eq },
            FilterDef { param: "location", columns: &["name", "address"], op: FilterOp::Contains },
        ],
        scope: None,
        sort: SortSpec::Fixed { column: "id", descending: false },
    }),
    delete: DeleteMode::None,
    require_update_fields: false,
};

pub static EVACUATION_ROUTES: ResourceDef = ResourceDef {
    name: "routes",
    path: "/resources/evacuation-routes",
    table: "evacuation_routes",
    label: "Evacuation route",
    columns: &[
        ColumnDef::primary_key(),
        ColumnDef::text("name", "Name"),
        ColumnDef::text("route_from", "Route from"),
        ColumnDef::text("route_to", "Route to"),
        ColumnDef::text("status", "Status").one_of(
            &["open", "congested", "closed"],
            "INVALID_STATUS",
            "Status must be one of: open, congested, closed",
        ),
        ColumnDef::text("traffic", "Traffic").one_of(
            &["light", "moderate", "heavy"],
            "INVALID_TRAFFIC",
            "Traffic must be one of: light, moderate, heavy",
        ),
        ColumnDef::text("distance", "Distance"),
        ColumnDef::text("description", "Description").optional(),
    ],
    required_style: RequiredStyle::AllAtOnce("Name, routeFrom, routeTo, status, traffic, and distance are required"),
    list: Some(ListSpec {
        filters: &[FilterDef { param: "status", columns: &["status"], op: FilterOp::Eq }],
        scope: None,
        sort: SortSpec::Fixed { column: "id", descending: false },
    }),
    delete: DeleteMode::None,
    require_update_fields: false,
};

pub static WEATHER: ResourceDef = ResourceDef {
    name: "readings",
    path: "/weather",
    table: "weather_data",
    label: "Weather reading",
    columns: &[
        ColumnDef::primary_key(),
        ColumnDef::real("temperature", "Temperature").range(
            Some(-50.0),
            Some(60.0),
            "INVALID_TEMPERATURE",
            "Temperature must be a number between -50 and 60 degrees Celsius",
        ),
        ColumnDef::real("wind_speed", "Wind speed").range(Some(0.0), None, "INVALID_WIND_SPEED", "Wind speed must be a number >= 0"),
        ColumnDef::real("humidity", "Humidity").range(
            Some(0.0),
            Some(100.0),
            "INVALID_HUMIDITY",
            "Humidity must be a number between 0 and 100",
        ),
        ColumnDef::text("conditions", "Conditions"),
        ColumnDef::text("location", "Location"),
        ColumnDef::timestamp("timestamp", false),
    ],
    required_style: RequiredStyle::AllAtOnce("Temperature, windSpeed, humidity, conditions, and location are required"),
    list: Some(ListSpec {
        filters: &[FilterDef { param: "location", columns: &["location"], op: FilterOp::Contains }],
        scope: None,
        sort: SortSpec::Fixed { column: "timestamp", descending: true },
    }),
    delete: DeleteMode::None,
    require_update_fields: false,
};

pub static STATS: ResourceDef = ResourceDef {
    name: "stats",
    path: "/stats",
    table: "stats",
    label: "Stats record",
    columns: &[
        ColumnDef::primary_key(),
        ColumnDef::integer("active_incidents", "activeIncidents")
            .with_default("0")
            .range(Some(0.0), None, "INVALID_FIELD_VALUE", "activeIncidents must be a number >= 0"),
        ColumnDef::integer("people_assisted", "peopleAssisted")
            .with_default("0")
            .range(Some(0.0), None, "INVALID_FIELD_VALUE", "peopleAssisted must be a number >= 0"),
        ColumnDef::integer("shelters_active", "sheltersActive")
            .with_default("0")
            .range(Some(0.0), None, "INVALID_FIELD_VALUE", "sheltersActive must be a number >= 0"),
        ColumnDef::integer("coverage_areas", "coverageAreas")
            .with_default("0")
            .range(Some(0.0), None, "INVALID_FIELD_VALUE", "coverageAreas must be a number >= 0"),
        ColumnDef::timestamp("last_updated", true),
    ],
    required_style: RequiredStyle::AllAtOnce("Required stats fields are missing"),
    list: None,
    delete: DeleteMode::None,
    require_update_fields: true,
};

/// Every resource, in route-registration order.
pub fn all_resources() -> Vec<&'static ResourceDef> {
    vec![&ALERTS, &EMERGENCY_CONTACTS, &SHELTERS, &EVACUATION_ROUTES, &WEATHER, &STATS]
}
