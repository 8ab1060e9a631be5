//! Fixed reference data: Indian states, their districts and bounding boxes,
//! and the name pools the generator draws from.

use crate::types::BoundingBox;

/// A state with its districts and approximate bounding box.
///
/// Boxes overlap neighbouring states; they are not administrative borders.
#[derive(Debug, Clone, Copy)]
pub struct StateInfo {
    pub name: &'static str,
    pub districts: &'static [&'static str],
    pub bounds: BoundingBox,
}

pub const STATES: &[StateInfo] = &[
    StateInfo {
        name: "Maharashtra",
        districts: &["Pune", "Nashik", "Nagpur", "Aurangabad", "Solapur"],
        bounds: BoundingBox::new((15.5, 22.0), (72.5, 80.5)),
    },
    StateInfo {
        name: "Uttar Pradesh",
        districts: &["Lucknow", "Kanpur", "Agra", "Varanasi", "Meerut"],
        bounds: BoundingBox::new((23.5, 31.0), (77.0, 84.5)),
    },
    StateInfo {
        name: "Karnataka",
        districts: &["Belagavi", "Mysuru", "Dharwad", "Ballari", "Tumakuru"],
        bounds: BoundingBox::new((11.5, 18.5), (74.0, 78.5)),
    },
    StateInfo {
        name: "Madhya Pradesh",
        districts: &["Indore", "Bhopal", "Jabalpur", "Gwalior", "Ujjain"],
        bounds: BoundingBox::new((21.0, 26.5), (74.0, 82.5)),
    },
    StateInfo {
        name: "Gujarat",
        districts: &["Ahmedabad", "Rajkot", "Surat", "Vadodara", "Junagadh"],
        bounds: BoundingBox::new((20.0, 24.5), (68.5, 74.5)),
    },
    StateInfo {
        name: "Rajasthan",
        districts: &["Jaipur", "Jodhpur", "Kota", "Bikaner", "Udaipur"],
        bounds: BoundingBox::new((23.0, 30.0), (69.5, 78.5)),
    },
    StateInfo {
        name: "Tamil Nadu",
        districts: &["Thanjavur", "Coimbatore", "Madurai", "Salem", "Tiruchirappalli"],
        bounds: BoundingBox::new((8.0, 13.5), (76.5, 80.5)),
    },
    StateInfo {
        name: "Andhra Pradesh",
        districts: &["Guntur", "Krishna", "Kurnool", "Anantapur", "East Godavari"],
        bounds: BoundingBox::new((13.0, 19.5), (77.0, 84.5)),
    },
    StateInfo {
        name: "Telangana",
        districts: &["Warangal", "Karimnagar", "Nalgonda", "Khammam", "Nizamabad"],
        bounds: BoundingBox::new((15.5, 19.5), (77.5, 81.5)),
    },
    StateInfo {
        name: "West Bengal",
        districts: &["Bardhaman", "Nadia", "Murshidabad", "Hooghly", "Malda"],
        bounds: BoundingBox::new((21.5, 27.0), (85.5, 89.5)),
    },
    StateInfo {
        name: "Bihar",
        districts: &["Patna", "Gaya", "Muzaffarpur", "Bhagalpur", "Darbhanga"],
        bounds: BoundingBox::new((24.0, 27.5), (83.0, 88.0)),
    },
    StateInfo {
        name: "Punjab",
        districts: &["Ludhiana", "Amritsar", "Bathinda", "Patiala", "Jalandhar"],
        bounds: BoundingBox::new((29.5, 32.5), (74.0, 76.5)),
    },
    StateInfo {
        name: "Haryana",
        districts: &["Karnal", "Hisar", "Sirsa", "Kurukshetra", "Rohtak"],
        bounds: BoundingBox::new((27.5, 30.5), (74.5, 77.5)),
    },
    StateInfo {
        name: "Odisha",
        districts: &["Cuttack", "Sambalpur", "Ganjam", "Balasore", "Koraput"],
        bounds: BoundingBox::new((17.5, 22.5), (81.5, 87.5)),
    },
    StateInfo {
        name: "Kerala",
        districts: &["Palakkad", "Thrissur", "Wayanad", "Kottayam", "Alappuzha"],
        bounds: BoundingBox::new((8.0, 12.5), (74.5, 77.5)),
    },
];

/// Village names, not tied to any state
pub const VILLAGES: &[&str] = &[
    "Rampur", "Sitapur", "Devgaon", "Kalyanpur", "Shivpuri", "Chandanpur", "Govindpur",
    "Haripur", "Lakshmipur", "Madhavpur", "Nandgaon", "Pipalgaon", "Ramnagar", "Sonpur",
    "Tilakpur", "Udaypur", "Vishnupur", "Amarpur", "Bhawanipur", "Dharampur",
];

pub const FIRST_NAMES: &[&str] = &[
    "Amit", "Rajesh", "Suresh", "Ramesh", "Vijay", "Sanjay", "Arun", "Mohan", "Ravi", "Kiran",
    "Sunil", "Anil", "Vinod", "Mahesh", "Rajendra", "Prakash", "Dinesh", "Ashok", "Rajkumar",
    "Vikram", "Priya", "Kavita", "Sunita", "Rekha", "Meera", "Anita", "Sarika", "Poonam",
    "Geeta", "Seema", "Ritu", "Neha", "Pooja", "Komal", "Rina", "Sonia", "Anjali", "Shweta",
];

pub const LAST_NAMES: &[&str] = &[
    "Sharma", "Verma", "Gupta", "Singh", "Kumar", "Patel", "Jain", "Agarwal", "Yadav",
    "Chauhan", "Pandey", "Mishra", "Tiwari", "Dubey", "Rao", "Nair", "Pillai", "Menon", "Iyer",
    "Shastri", "Joshi", "Desai", "Shah", "Mehta", "Kapoor", "Khanna", "Malhotra", "Saxena",
    "Bhatnagar", "Trivedi",
];

/// Look up a state by exact name
pub fn find_state(name: &str) -> Option<&'static StateInfo> {
    STATES.iter().find(|s| s.name == name)
}

/// Names of all states in catalog order
pub fn state_names() -> impl Iterator<Item = &'static str> {
    STATES.iter().map(|s| s.name)
}

impl StateInfo {
    pub fn has_district(&self, district: &str) -> bool {
        self.districts.contains(&district)
    }
}
