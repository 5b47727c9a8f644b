//! Closed enumeration of the place categories accepted by the nearby search.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

macro_rules! place_types {
    ($($variant:ident => $name:literal,)+) => {
        /// Place category understood by the provider's nearby search.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        #[serde(rename_all = "snake_case")]
        pub enum PlaceType {
            $($variant,)+
        }

        impl PlaceType {
            /// Every category, in wire-name order.
            pub const ALL: &'static [PlaceType] = &[$(PlaceType::$variant,)+];

            /// Wire name sent as the `type` query parameter.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(PlaceType::$variant => $name,)+
                }
            }
        }
    };
}

place_types! {
    Accounting => "accounting",
    Airport => "airport",
    AmusementPark => "amusement_park",
    Aquarium => "aquarium",
    ArtGallery => "art_gallery",
    Atm => "atm",
    Bakery => "bakery",
    Bank => "bank",
    Bar => "bar",
    BeautySalon => "beauty_salon",
    BicycleStore => "bicycle_store",
    BookStore => "book_store",
    BowlingAlley => "bowling_alley",
    BusStation => "bus_station",
    Cafe => "cafe",
    Campground => "campground",
    CarDealer => "car_dealer",
    CarRental => "car_rental",
    CarRepair => "car_repair",
    CarWash => "car_wash",
    Casino => "casino",
    Cemetery => "cemetery",
    Church => "church",
    CityHall => "city_hall",
    ClothingStore => "clothing_store",
    ConvenienceStore => "convenience_store",
    Courthouse => "courthouse",
    Dentist => "dentist",
    DepartmentStore => "department_store",
    Doctor => "doctor",
    Drugstore => "drugstore",
    Electrician => "electrician",
    ElectronicsStore => "electronics_store",
    Embassy => "embassy",
    FireStation => "fire_station",
    Florist => "florist",
    FuneralHome => "funeral_home",
    FurnitureStore => "furniture_store",
    GasStation => "gas_station",
    Gym => "gym",
    HairCare => "hair_care",
    HardwareStore => "hardware_store",
    HinduTemple => "hindu_temple",
    HomeGoodsStore => "home_goods_store",
    Hospital => "hospital",
    InsuranceAgency => "insurance_agency",
    JewelryStore => "jewelry_store",
    Laundry => "laundry",
    Lawyer => "lawyer",
    Library => "library",
    LightRailStation => "light_rail_station",
    LiquorStore => "liquor_store",
    LocalGovernmentOffice => "local_government_office",
    Locksmith => "locksmith",
    Lodging => "lodging",
    MealDelivery => "meal_delivery",
    MealTakeaway => "meal_takeaway",
    Mosque => "mosque",
    MovieRental => "movie_rental",
    MovieTheater => "movie_theater",
    MovingCompany => "moving_company",
    Museum => "museum",
    NightClub => "night_club",
    Painter => "painter",
    Park => "park",
    Parking => "parking",
    PetStore => "pet_store",
    Pharmacy => "pharmacy",
    Physiotherapist => "physiotherapist",
    Plumber => "plumber",
    Police => "police",
    PostOffice => "post_office",
    PrimarySchool => "primary_school",
    RealEstateAgency => "real_estate_agency",
    Restaurant => "restaurant",
    RoofingContractor => "roofing_contractor",
    RvPark => "rv_park",
    School => "school",
    SecondarySchool => "secondary_school",
    ShoeStore => "shoe_store",
    ShoppingMall => "shopping_mall",
    Spa => "spa",
    Stadium => "stadium",
    Storage => "storage",
    Store => "store",
    SubwayStation => "subway_station",
    Supermarket => "supermarket",
    Synagogue => "synagogue",
    TaxiStand => "taxi_stand",
    TouristAttraction => "tourist_attraction",
    TrainStation => "train_station",
    TransitStation => "transit_station",
    TravelAgency => "travel_agency",
    University => "university",
    VeterinaryCare => "veterinary_care",
    Zoo => "zoo",
}

impl fmt::Display for PlaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlaceType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown place type '{}'", s))
    }
}
