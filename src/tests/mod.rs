mod test_utils;
mod test_forward;
mod test_from_yaml;
mod test_position_analysis;
