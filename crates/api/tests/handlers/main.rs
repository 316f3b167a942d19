mod availability_test;
mod booking_test;
mod middleware_test;
mod opening_rule_test;
mod test_utils;
mod venue_test;
