pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{address_builder::*, listing_builder::*};

pub mod listing_builder {

    use super::*;
    use crate::{address::*, geo::*, id::*, listing::*, price::*, time::*};

    #[derive(Debug)]
    pub struct ListingBuild {
        listing: BusinessListing,
    }

    impl ListingBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.listing.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.listing.name = name.into();
            self
        }
        pub fn category(mut self, category: &str) -> Self {
            self.listing.category = Some(category.into());
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.listing.pos = Some(pos);
            self
        }
        pub fn map_link(mut self, link: &str) -> Self {
            self.listing.map_link = Some(link.into());
            self
        }
        pub fn address(mut self, address: Address) -> Self {
            self.listing.address = Some(address);
            self
        }
        pub fn price_range(mut self, min: u32, max: u32) -> Self {
            self.listing.price_range = Some(PriceRange::new(min, max));
            self
        }
        pub fn rating(mut self, rating: f64) -> Self {
            self.listing.rating = Some(rating);
            self
        }
        pub fn review_count(mut self, count: u32) -> Self {
            self.listing.review_count = Some(count);
            self
        }
        pub fn created_at(mut self, created_at: Timestamp) -> Self {
            self.listing.created_at = Some(created_at);
            self
        }
        pub fn status(mut self, status: ListingStatus) -> Self {
            self.listing.status = status;
            self
        }
        pub fn finish(self) -> BusinessListing {
            self.listing
        }
    }

    impl Builder for BusinessListing {
        type Build = ListingBuild;
        fn build() -> ListingBuild {
            ListingBuild {
                listing: BusinessListing {
                    id: Id::new(),
                    name: "".into(),
                    category: None,
                    subcategory: None,
                    address: None,
                    pos: None,
                    map_link: None,
                    price_range: None,
                    opening_hours: None,
                    hidden_gem: false,
                    must_visit: false,
                    rating: None,
                    review_count: None,
                    created_at: None,
                    status: ListingStatus::Approved,
                },
            }
        }
    }
}

pub mod address_builder {

    use super::*;
    use crate::address::*;

    #[derive(Debug)]
    pub struct AddressBuild {
        addr: Address,
    }

    impl AddressBuild {
        pub fn street(mut self, x: &str) -> Self {
            self.addr.street = Some(x.into());
            self
        }
        pub fn area(mut self, x: &str) -> Self {
            self.addr.area = Some(x.into());
            self
        }
        pub fn city(mut self, x: &str) -> Self {
            self.addr.city = Some(x.into());
            self
        }
        pub fn state(mut self, x: &str) -> Self {
            self.addr.state = Some(x.into());
            self
        }
        pub fn postal_code(mut self, x: &str) -> Self {
            self.addr.postal_code = Some(x.into());
            self
        }
        pub fn country(mut self, x: &str) -> Self {
            self.addr.country = Some(x.into());
            self
        }
        pub fn finish(self) -> Address {
            self.addr
        }
    }

    impl Builder for Address {
        type Build = AddressBuild;
        fn build() -> Self::Build {
            AddressBuild {
                addr: Address::default(),
            }
        }
    }

    #[test]
    fn empty_address() {
        assert!(Address::default().is_empty());
        assert!(!Address::build().street("x").finish().is_empty());
        assert!(!Address::build().area("x").finish().is_empty());
        assert!(!Address::build().city("x").finish().is_empty());
        assert!(!Address::build().state("x").finish().is_empty());
        assert!(!Address::build().postal_code("x").finish().is_empty());
        assert!(!Address::build().country("x").finish().is_empty());
    }
}
