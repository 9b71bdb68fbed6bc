mod serialization_unit;
